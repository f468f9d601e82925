use thiserror::Error;

/// Errors that can occur when binning or rendering.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot bin an empty set of values")]
    Empty,

    #[error("got {weights} weights for {values} values")]
    WeightMismatch { values: usize, weights: usize },

    #[error("histogram needs at least one bin")]
    ZeroBins,

    #[error("value {0} is not finite")]
    NonFinite(f64),

    #[error("figure has no series to draw")]
    NoSeries,

    #[error("bundled font could not be loaded")]
    Font,

    #[error("failed to render figure")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}
