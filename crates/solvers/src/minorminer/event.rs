/// The phase of an embedding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Chains may share target nodes; the overlap penalty grows each round.
    Overlap,

    /// Chains are disjoint; each round tries to shorten them.
    Refine,
}

/// Emitted once per completed round of an embedding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Zero-based attempt index.
    pub attempt: usize,

    /// One-based round within the attempt, counted across both phases.
    pub round: usize,

    pub phase: Phase,

    /// Target nodes currently claimed by more than one chain.
    pub overlapping_qubits: usize,

    /// Target nodes used across all chains.
    pub total_qubits: usize,

    pub max_chain_length: usize,
}
