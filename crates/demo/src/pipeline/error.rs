use std::{error::Error as StdError, io, path::PathBuf};

use nae3sat_core::BqmError;
use nae3sat_plot::PlotError;
use thiserror::Error;

/// Errors that end a sweep.
///
/// Service failures are boxed so the pipeline stays independent of the
/// concrete generator, embedder, and sampler types.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to create plot directory {}", path.display())]
    PlotDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to generate a problem with rho={rho:?}")]
    Generate {
        rho: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("generated problem has no interaction graph")]
    Model(#[from] BqmError),

    #[error("failed to embed problem into {backend}")]
    Embed {
        backend: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("failed to sample problem on {backend}")]
    Sample {
        backend: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("failed to plot results")]
    Plot(#[from] PlotError),
}

impl PipelineError {
    pub(crate) fn generate(rho: f64, err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Generate {
            rho,
            source: Box::new(err),
        }
    }

    pub(crate) fn embed(backend: &str, err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Embed {
            backend: backend.to_owned(),
            source: Box::new(err),
        }
    }

    pub(crate) fn sample(backend: &str, err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Sample {
            backend: backend.to_owned(),
            source: Box::new(err),
        }
    }
}
