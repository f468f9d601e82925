//! Service implementations for the NAE3SAT embedding demo.
//!
//! # Modules
//!
//! - [`generators`] — seeded random problem generators
//! - [`minorminer`] — heuristic minor embedding by negotiated path routing
//! - [`sampling`] — simulated annealing and the embedding/scaling composites
//!   that put a logical problem onto a hardware sampler

pub mod generators;
pub mod minorminer;
pub mod sampling;
