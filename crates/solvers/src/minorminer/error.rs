use nae3sat_core::InvalidEmbedding;

/// Errors that can occur during an embedding search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source graph has {source_nodes} nodes but target graph has only {target_nodes}")]
    TargetTooSmall {
        source_nodes: usize,
        target_nodes: usize,
    },

    #[error("no embedding found after {tries} tries")]
    NotFound { tries: usize },

    #[error("stopped by observer before an embedding was found")]
    Stopped,

    #[error("search produced an invalid embedding: {0}")]
    Invalid(#[from] InvalidEmbedding),
}
