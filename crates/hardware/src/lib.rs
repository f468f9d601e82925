//! Simulated annealing hardware for the NAE3SAT embedding demo.
//!
//! - [`topology`] builds the Pegasus and Zephyr coupler graphs.
//! - [`SimulatedQpu`] samples models on one of those graphs.
//! - [`SolverRegistry`] lists the available solvers and hands them out by
//!   [`SolverFilter`].

pub mod topology;

mod qpu;
mod registry;

pub use qpu::{ConfigError, QpuConfig, QpuError, SimulatedQpu, Term};
pub use registry::{
    ADVANTAGE, ADVANTAGE2_PROTOTYPE, HardwareError, SolverFilter, SolverRegistry,
};
