use std::{path::Path, sync::OnceLock};

use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    prelude::*,
    style::{FontStyle, register_font},
};
use tracing::debug;

use crate::{Histogram, PlotError};

/// Series colors, cycled in the order series are added.
const PALETTE: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

/// Family used for every label, including plotters' default tick and
/// legend text.
const FONT: &str = "sans-serif";

static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Registers the bundled font once per process.
fn ensure_font() -> Result<(), PlotError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| register_font(FONT, FontStyle::Normal, FONT_BYTES).is_ok());
    if ok { Ok(()) } else { Err(PlotError::Font) }
}

/// Configuration for rendering a [`Figure`].
///
/// Construct with [`FigureConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```
/// use nae3sat_plot::FigureConfig;
///
/// let config = FigureConfig::new()
///     .title("rho=2.1, N=75")
///     .x_label("Energy")
///     .y_label("Count")
///     .legend();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FigureConfig {
    title: Option<String>,
    x_label: String,
    y_label: String,
    legend: bool,
    alpha: f64,
    size: (u32, u32),
}

impl FigureConfig {
    /// Creates a config with defaults: no title or labels, no legend, bars
    /// at 0.7 opacity, and a 640 x 480 image.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            x_label: String::new(),
            y_label: String::new(),
            legend: false,
            alpha: 0.7,
            size: (640, 480),
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    /// Enables a legend labeling each series by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Sets the bar opacity, clamped to `[0, 1]`.
    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Sets the image size in pixels.
    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A set of overlaid histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    config: FigureConfig,
    series: Vec<(String, Histogram)>,
}

impl Figure {
    #[must_use]
    pub fn new(config: FigureConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    /// Adds a histogram drawn on top of the existing series.
    pub fn add_series(&mut self, label: impl Into<String>, histogram: Histogram) {
        self.series.push((label.into(), histogram));
    }

    #[must_use]
    pub fn num_series(&self) -> usize {
        self.series.len()
    }

    /// Renders the figure to a PNG file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure has no series or the image cannot be
    /// drawn or written.
    pub fn save(&self, path: &Path) -> Result<(), PlotError> {
        if self.series.is_empty() {
            return Err(PlotError::NoSeries);
        }
        ensure_font()?;
        let root = BitMapBackend::new(path, self.config.size).into_drawing_area();
        self.draw(&root)
            .map_err(|error| PlotError::Render(Box::new(error)))?;
        debug!(path = %path.display(), series = self.series.len(), "saved figure");
        Ok(())
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let (x_lo, x_hi) = self
            .series
            .iter()
            .map(|(_, hist)| hist.range())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (l, h)| {
                (lo.min(l), hi.max(h))
            });
        let y_max = self
            .series
            .iter()
            .flat_map(|(_, hist)| hist.counts().iter().copied())
            .fold(0.0, f64::max);
        let y_hi = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50);
        if let Some(title) = &self.config.title {
            builder.caption(title, (FONT, 22));
        }
        let mut chart = builder.build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(self.config.x_label.as_str())
            .y_desc(self.config.y_label.as_str())
            .draw()?;

        for (i, (label, hist)) in self.series.iter().enumerate() {
            let style = PALETTE[i % PALETTE.len()].mix(self.config.alpha).filled();
            chart
                .draw_series(
                    hist.bins()
                        .map(|(left, right, count)| Rectangle::new([(left, 0.0), (right, count)], style)),
                )?
                .label(label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], style));
        }

        if self.config.legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()
    }
}
