//! Traits for the external services the pipeline sequences.
//!
//! The pipeline treats problem generation, minor embedding, and sampling as
//! opaque collaborators. Each trait is deliberately narrow so that stand-ins
//! returning canned results can replace the real services in tests.

use std::fmt;

use crate::{Bqm, Embedding, Graph, SampleSet};

/// Parameters for generating a random constraint problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemSpec {
    pub num_variables: usize,
    pub num_clauses: usize,
    pub seed: u64,
}

/// Produces a binary quadratic model from a [`ProblemSpec`].
///
/// Generators must be reproducible: the same spec yields the same model.
pub trait ProblemGenerator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generates a problem instance.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the spec cannot be satisfied.
    fn generate(&self, spec: &ProblemSpec) -> Result<Bqm, Self::Error>;
}

/// Finds a minor embedding of a source graph into a target graph.
pub trait Embedder {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps every source node to a chain of target nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no embedding can be found.
    fn find_embedding(&self, source: &Graph, target: &Graph) -> Result<Embedding, Self::Error>;
}

/// The family of a hardware coupler graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyKind {
    Pegasus,
    Zephyr,
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pegasus => f.write_str("pegasus"),
            Self::Zephyr => f.write_str("zephyr"),
        }
    }
}

/// A hardware topology family together with its shape parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub kind: TopologyKind,
    pub shape: Vec<usize>,
}

/// Numeric properties a sampling backend publishes about itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverProperties {
    /// Allowed range of linear biases.
    pub h_range: [f64; 2],

    /// Allowed range of interaction biases when auto-scaling.
    pub j_range: [f64; 2],

    /// Allowed range of interaction biases when auto-scaling is disabled.
    pub extended_j_range: [f64; 2],

    pub num_qubits: usize,

    pub topology: Topology,
}

/// Per-call settings for a [`Sampler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleParams {
    pub num_reads: usize,

    /// Lets the backend rescale the problem into its own ranges.
    pub auto_scale: bool,

    /// Free-form label attached to the submission.
    pub label: Option<String>,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            num_reads: 1,
            auto_scale: true,
            label: None,
        }
    }
}

/// A backend that returns low-energy samples of a model on its own graph.
///
/// The model passed to [`sample`](Sampler::sample) must be expressed over the
/// backend's nodes: every variable is a node of [`graph`](Sampler::graph) and
/// every interaction is one of its edges.
pub trait Sampler {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the backend's identity.
    fn name(&self) -> &str;

    /// Returns the hardware graph.
    fn graph(&self) -> &Graph;

    fn properties(&self) -> &SolverProperties;

    /// Samples the model.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the backend rejects the model or fails.
    fn sample(&self, bqm: &Bqm, params: &SampleParams) -> Result<SampleSet, Self::Error>;
}

/// Allows composites to wrap a borrowed backend.
impl<S: Sampler + ?Sized> Sampler for &S {
    type Error = S::Error;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn graph(&self) -> &Graph {
        (**self).graph()
    }

    fn properties(&self) -> &SolverProperties {
        (**self).properties()
    }

    fn sample(&self, bqm: &Bqm, params: &SampleParams) -> Result<SampleSet, Self::Error> {
        (**self).sample(bqm, params)
    }
}
