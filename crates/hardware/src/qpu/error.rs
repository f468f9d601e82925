use std::fmt;

use nae3sat_core::BqmError;
use thiserror::Error;

/// A term of a submitted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Linear(usize),
    Quadratic(usize, usize),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear(q) => write!(f, "qubit {q}"),
            Self::Quadratic(p, q) => write!(f, "coupler ({p}, {q})"),
        }
    }
}

/// Errors a [`SimulatedQpu`](super::SimulatedQpu) returns for a rejected
/// submission.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QpuError {
    #[error("coupler ({0}, {1}) does not exist on this solver")]
    MissingCoupler(usize, usize),

    #[error("qubit {qubit} does not exist on a solver with {num_qubits} qubits")]
    InvalidQubit { qubit: usize, num_qubits: usize },

    #[error("bias {bias} on {term} is outside the allowed range {range:?}")]
    BiasOutOfRange {
        term: Term,
        bias: f64,
        range: [f64; 2],
    },

    #[error("num_reads must be at least 1")]
    InvalidReads,

    #[error(transparent)]
    Model(#[from] BqmError),
}
