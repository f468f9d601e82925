use nae3sat_core::{Sampler, Topology, TopologyKind};
use thiserror::Error;

use crate::{
    qpu::{QpuConfig, SimulatedQpu},
    topology::TopologyError,
};

/// Name of the simulated Pegasus solver.
pub const ADVANTAGE: &str = "Advantage_sim4.1";

/// Name of the simulated Zephyr solver.
pub const ADVANTAGE2_PROTOTYPE: &str = "Adv2_proto_sim1.1";

/// Errors that can occur when acquiring a solver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HardwareError {
    #[error("no solver matches {0}")]
    NoSolver(SolverFilter),

    #[error("failed to build solver {name}")]
    Build {
        name: String,
        #[source]
        source: TopologyError,
    },
}

/// Selects solvers by their published properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverFilter {
    pub topology: TopologyKind,
}

impl SolverFilter {
    /// Matches solvers whose coupler graph belongs to `kind`.
    #[must_use]
    pub fn topology(kind: TopologyKind) -> Self {
        Self { topology: kind }
    }

    fn matches(&self, solver: &SimulatedQpu) -> bool {
        solver.properties().topology.kind == self.topology
    }
}

impl std::fmt::Display for SolverFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "topology type {}", self.topology)
    }
}

/// The set of solvers available to a client.
#[derive(Debug, Clone)]
pub struct SolverRegistry {
    solvers: Vec<SimulatedQpu>,
}

impl SolverRegistry {
    #[must_use]
    pub fn new(solvers: Vec<SimulatedQpu>) -> Self {
        Self { solvers }
    }

    /// Builds the two simulated production solvers with a shared config:
    ///
    /// - [`ADVANTAGE`] on a `P16` Pegasus graph,
    /// - [`ADVANTAGE2_PROTOTYPE`] on a `Z(8, 4)` Zephyr graph.
    ///
    /// # Errors
    ///
    /// Returns an error if a solver's coupler graph cannot be built.
    pub fn simulated(config: QpuConfig) -> Result<Self, HardwareError> {
        let catalog = [
            (ADVANTAGE, TopologyKind::Pegasus, vec![16]),
            (ADVANTAGE2_PROTOTYPE, TopologyKind::Zephyr, vec![8, 4]),
        ];
        let solvers = catalog
            .into_iter()
            .map(|(name, kind, shape)| {
                SimulatedQpu::new(name, Topology { kind, shape }, config).map_err(|source| {
                    HardwareError::Build {
                        name: name.to_owned(),
                        source,
                    }
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { solvers })
    }

    #[must_use]
    pub fn solvers(&self) -> &[SimulatedQpu] {
        &self.solvers
    }

    /// Returns the first solver matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::NoSolver`] if no solver matches.
    pub fn get(&self, filter: &SolverFilter) -> Result<&SimulatedQpu, HardwareError> {
        self.solvers
            .iter()
            .find(|solver| filter.matches(solver))
            .ok_or(HardwareError::NoSolver(*filter))
    }
}
