//! The NAE3SAT embedding demo.
//!
//! For every clause-to-variable ratio in a [`SweepConfig`], the [`pipeline`]
//! generates a random NAE3SAT problem, embeds it onto each hardware backend,
//! samples it through the embedding, and overlays the per-backend chain
//! length and energy histograms in one PNG per ratio and plot type.
//!
//! [`ProgressLog`] is the observer the `nae3sat` binary uses to report
//! progress.

pub mod pipeline;

mod progress;

pub use pipeline::{Action, ConfigError, Event, PipelineError, Run, Status, Summary, SweepConfig};
pub use progress::ProgressLog;
