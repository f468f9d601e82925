//! Histogram figures for the NAE3SAT demo.
//!
//! A [`Histogram`] bins weighted values. A [`Figure`] overlays one histogram
//! per series and renders them to a PNG file. [`Figures`] keeps figures
//! alive by [`FigureKey`], so later series can be added to an existing
//! figure and the file rewritten.
//!
//! Text is drawn with DejaVu Sans, bundled in `assets/` and registered with
//! plotters the first time a figure is saved.

mod error;
mod figure;
mod figures;
mod histogram;

pub use error::PlotError;
pub use figure::{Figure, FigureConfig};
pub use figures::{FigureKey, Figures};
pub use histogram::{Bins, Histogram};
