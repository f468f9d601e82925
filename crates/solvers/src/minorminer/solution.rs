use nae3sat_core::Embedding;

/// Indicates how the embedding search finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Chain-length refinement stopped improving.
    Converged,

    /// Reached the round limit while still refining chain lengths.
    MaxRounds,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of an embedding search.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Final search status.
    pub status: Status,

    /// The verified embedding.
    pub embedding: Embedding,

    /// Number of attempts used, counting the successful one.
    pub attempts: usize,

    /// Rounds run during the successful attempt.
    pub rounds: usize,
}
