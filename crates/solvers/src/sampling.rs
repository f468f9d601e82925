//! Sampling a logical problem on a hardware sampler.
//!
//! A logical [`Bqm`](nae3sat_core::Bqm) cannot be sent to hardware directly:
//! its variables must first be mapped onto chains of physical qubits, its
//! biases must fit the hardware's ranges, and the physical samples must be
//! mapped back. The pieces compose the same way they are stacked:
//!
//! ```ignore
//! let scaled = ScaleComposite::new(&backend, ScaleRanges::extended(backend.properties()));
//! let sampleset = FixedEmbeddingComposite::new(&scaled, &embedding).sample(&bqm, &params)?;
//! ```
//!
//! # Modules
//!
//! - [`annealing`] — Metropolis simulated annealing over spins
//! - [`embed_bqm`] / [`unembed`] — chain expansion and majority-vote recovery
//! - [`ScaleComposite`] — normalizes biases into the sampler's ranges
//! - [`FixedEmbeddingComposite`] — embeds, samples, and unembeds

pub mod annealing;

mod embed;
mod fixed_embedding;
mod scale;

pub use embed::{EmbedError, embed_bqm, unembed};
pub use fixed_embedding::{CompositeError, EmbeddedParams, FixedEmbeddingComposite};
pub use scale::{ScaleComposite, ScaleRanges, normalization_scalar};
