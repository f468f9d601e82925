use nae3sat_core::{Bqm, Embedding, SampleParams, SampleSet, Sampler};
use thiserror::Error;
use tracing::debug;

use super::embed::{EmbedError, embed_bqm, unembed};

/// Parameters for sampling through a [`FixedEmbeddingComposite`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedParams {
    /// Magnitude of the ferromagnetic coupling placed on chain edges.
    pub chain_strength: f64,

    /// Parameters forwarded to the child sampler.
    pub sample: SampleParams,
}

/// Errors that can occur while sampling through an embedding.
#[derive(Debug, Error)]
pub enum CompositeError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error("child sampler failed")]
    Sampler(#[source] E),
}

/// Samples logical models on a hardware sampler through a fixed embedding.
///
/// The model is expanded onto the chains of the embedding, sampled by the
/// child, and the physical samples are mapped back to logical variables.
#[derive(Debug, Clone)]
pub struct FixedEmbeddingComposite<'e, S> {
    child: S,
    embedding: &'e Embedding,
}

impl<'e, S: Sampler> FixedEmbeddingComposite<'e, S> {
    pub fn new(child: S, embedding: &'e Embedding) -> Self {
        Self { child, embedding }
    }

    pub fn embedding(&self) -> &Embedding {
        self.embedding
    }

    /// Samples `bqm` and returns samples over its own variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be placed on the embedding or the
    /// child sampler fails.
    pub fn sample(
        &self,
        bqm: &Bqm,
        params: &EmbeddedParams,
    ) -> Result<SampleSet, CompositeError<S::Error>> {
        let embedded = embed_bqm(bqm, self.embedding, self.child.graph(), params.chain_strength)?;
        debug!(
            sampler = self.child.name(),
            qubits = embedded.num_variables(),
            couplers = embedded.num_interactions(),
            "embedded problem"
        );

        let physical = self
            .child
            .sample(&embedded, &params.sample)
            .map_err(CompositeError::Sampler)?;
        Ok(unembed(&physical, self.embedding, bqm)?)
    }
}
