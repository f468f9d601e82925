//! A simulated annealing processor.
//!
//! [`SimulatedQpu`] accepts the same submissions a physical annealer would:
//! a model over its qubits and couplers, with biases inside its published
//! ranges. Each read is a Metropolis anneal of the programmed model after
//! Gaussian control noise has been added to every bias, so repeated reads of
//! the same problem see slightly different hardware.

mod config;
mod error;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, QpuConfig};
pub use error::{QpuError, Term};

use nae3sat_core::{Bqm, Graph, SampleParams, SampleSet, Sampler, SolverProperties, Topology};
use nae3sat_solvers::sampling::{ScaleRanges, annealing::Annealer, normalization_scalar};
use rand::Rng;
use rand_distr::Distribution;
use tracing::debug;

use crate::topology::{self, TopologyError};

const H_RANGE: [f64; 2] = [-4.0, 4.0];
const J_RANGE: [f64; 2] = [-1.0, 1.0];
const EXTENDED_J_RANGE: [f64; 2] = [-2.0, 1.0];

/// Slack allowed on range checks, so biases scaled onto an endpoint pass.
const RANGE_TOLERANCE: f64 = 1e-9;

/// A simulated annealing processor with a fixed coupler graph.
#[derive(Debug, Clone)]
pub struct SimulatedQpu {
    name: String,
    graph: Graph,
    properties: SolverProperties,
    config: QpuConfig,
}

impl SimulatedQpu {
    /// Creates a solver named `name` on the coupler graph of `topology`.
    ///
    /// # Errors
    ///
    /// Returns an error if the topology shape is invalid.
    pub fn new(
        name: impl Into<String>,
        topology: Topology,
        config: QpuConfig,
    ) -> Result<Self, TopologyError> {
        let graph = topology::build(&topology)?;
        let properties = SolverProperties {
            h_range: H_RANGE,
            j_range: J_RANGE,
            extended_j_range: EXTENDED_J_RANGE,
            num_qubits: graph.num_nodes(),
            topology,
        };
        Ok(Self {
            name: name.into(),
            graph,
            properties,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &QpuConfig {
        &self.config
    }

    /// Returns this solver with its config replaced.
    #[must_use]
    pub fn with_config(mut self, config: QpuConfig) -> Self {
        self.config = config;
        self
    }

    /// Checks a submission against the hardware graph and ranges.
    fn validate(&self, bqm: &Bqm, params: &SampleParams) -> Result<(), QpuError> {
        if params.num_reads == 0 {
            return Err(QpuError::InvalidReads);
        }

        let num_qubits = self.properties.num_qubits;
        if let Some(qubit) = bqm.variables().find(|&q| q >= num_qubits) {
            return Err(QpuError::InvalidQubit { qubit, num_qubits });
        }
        if let Some((p, q, _)) = bqm.interactions().find(|&(p, q, _)| !self.graph.has_edge(p, q)) {
            return Err(QpuError::MissingCoupler(p, q));
        }

        if params.auto_scale {
            return Ok(());
        }
        let linear = bqm
            .linear_terms()
            .map(|(q, bias)| (Term::Linear(q), bias, self.properties.h_range));
        let quadratic = bqm.interactions().map(|(p, q, bias)| {
            (
                Term::Quadratic(p, q),
                bias,
                self.properties.extended_j_range,
            )
        });
        match linear
            .chain(quadratic)
            .find(|&(_, bias, [lo, hi])| bias < lo - RANGE_TOLERANCE || bias > hi + RANGE_TOLERANCE)
        {
            Some((term, bias, range)) => Err(QpuError::BiasOutOfRange { term, bias, range }),
            None => Ok(()),
        }
    }

    /// Returns the model the hardware actually anneals.
    ///
    /// With auto-scaling the model is first normalized into the standard
    /// ranges. Every bias then receives independent control noise.
    fn program<R: Rng>(&self, bqm: &Bqm, auto_scale: bool, rng: &mut R) -> Result<Bqm, QpuError> {
        let scale = if auto_scale {
            let inv_scalar = normalization_scalar(bqm, &ScaleRanges::standard(&self.properties));
            if inv_scalar > 0.0 { 1.0 / inv_scalar } else { 1.0 }
        } else {
            1.0
        };

        let noise = self.config.noise();
        let mut programmed = Bqm::new();
        for (q, bias) in bqm.linear_terms() {
            programmed.add_linear(q, bias * scale + noise.sample(rng));
        }
        for (p, q, bias) in bqm.interactions() {
            programmed.add_quadratic(p, q, bias * scale + noise.sample(rng))?;
        }
        Ok(programmed)
    }
}

impl Sampler for SimulatedQpu {
    type Error = QpuError;

    fn name(&self) -> &str {
        &self.name
    }

    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn properties(&self) -> &SolverProperties {
        &self.properties
    }

    /// Anneals `bqm` once per read.
    ///
    /// Energies are evaluated on the submitted model, not the noisy one that
    /// was annealed.
    fn sample(&self, bqm: &Bqm, params: &SampleParams) -> Result<SampleSet, QpuError> {
        self.validate(bqm, params)?;

        let annealer = Annealer::new(*self.config.annealing());
        let mut rng = annealer.rng();

        let programmed = self.program(bqm, params.auto_scale, &mut rng)?;
        let sampleset = annealer.sample_scored(
            &programmed,
            params.num_reads,
            &mut rng,
            |vars, sample| bqm.energy(vars, sample),
        )?;

        debug!(
            solver = %self.name,
            label = params.label.as_deref().unwrap_or_default(),
            qubits = bqm.num_variables(),
            reads = params.num_reads,
            distinct = sampleset.len(),
            "annealed problem"
        );
        Ok(sampleset)
    }
}
