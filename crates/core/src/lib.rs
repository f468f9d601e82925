//! Core types and traits for the NAE3SAT embedding demo.
//!
//! This crate defines the shared values that flow through the pipeline and the
//! narrow service traits the pipeline drives:
//!
//! - [`Bqm`] — a spin-valued binary quadratic model
//! - [`Graph`] — an undirected graph over dense node indices
//! - [`Embedding`] — a mapping from source variables to chains of target nodes
//! - [`SampleSet`] — aggregated samples with energies and occurrence counts
//! - [`Observer`] — receives events and optionally returns control actions
//! - [`ProblemGenerator`], [`Embedder`], [`Sampler`] — the external services
//!   the pipeline sequences

mod bqm;
mod embedding;
mod graph;
mod observer;
mod sample_set;
mod services;

pub use bqm::{BiasExtrema, Bqm, BqmError};
pub use embedding::{Embedding, InvalidEmbedding};
pub use graph::{Graph, GraphError};
pub use observer::Observer;
pub use sample_set::{Record, SampleSet};
pub use services::{
    Embedder, ProblemGenerator, ProblemSpec, SampleParams, Sampler, SolverProperties, Topology,
    TopologyKind,
};
