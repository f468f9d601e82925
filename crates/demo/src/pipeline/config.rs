use std::path::{Path, PathBuf};

use thiserror::Error;

/// Configuration for a problem sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    num_variables: usize,
    ratios: Vec<f64>,
    seed: u64,
    chain_strength: f64,
    num_reads: usize,
    auto_scale: bool,
    label: String,
    plot_dir: PathBuf,
}

/// Errors that can occur when validating a [`SweepConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("num_variables must be at least 1")]
    NumVariables,

    #[error("at least one clause ratio is required")]
    NoRatios,

    #[error("clause ratio must be finite and positive, got {0}")]
    Ratio(f64),

    #[error("chain_strength must be finite and positive, got {0}")]
    ChainStrength(f64),

    #[error("num_reads must be at least 1")]
    NumReads,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new(75, vec![2.1, 3.0]).expect("default sweep should always be valid")
    }
}

impl SweepConfig {
    /// Creates a sweep over `ratios` for problems with `num_variables`
    /// variables.
    ///
    /// The remaining settings take their defaults: seed 42, chain strength
    /// 3, 100 reads without backend auto-scaling, and plots written to
    /// `plots/`.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_variables` is zero, `ratios` is empty, or a
    /// ratio is not finite and positive.
    pub fn new(num_variables: usize, ratios: Vec<f64>) -> Result<Self, ConfigError> {
        if num_variables == 0 {
            return Err(ConfigError::NumVariables);
        }
        if ratios.is_empty() {
            return Err(ConfigError::NoRatios);
        }
        if let Some(&rho) = ratios.iter().find(|rho| !(rho.is_finite() && **rho > 0.0)) {
            return Err(ConfigError::Ratio(rho));
        }

        Ok(Self {
            num_variables,
            ratios,
            seed: 42,
            chain_strength: 3.0,
            num_reads: 100,
            auto_scale: false,
            label: "Example - NAE3SAT".to_owned(),
            plot_dir: PathBuf::from("plots"),
        })
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the ferromagnetic coupling that holds chains together.
    ///
    /// # Errors
    ///
    /// Returns an error if `chain_strength` is not finite and positive.
    pub fn with_chain_strength(mut self, chain_strength: f64) -> Result<Self, ConfigError> {
        if !(chain_strength.is_finite() && chain_strength > 0.0) {
            return Err(ConfigError::ChainStrength(chain_strength));
        }
        self.chain_strength = chain_strength;
        Ok(self)
    }

    /// Sets the number of reads requested from each backend.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_reads` is zero.
    pub fn with_num_reads(mut self, num_reads: usize) -> Result<Self, ConfigError> {
        if num_reads == 0 {
            return Err(ConfigError::NumReads);
        }
        self.num_reads = num_reads;
        Ok(self)
    }

    /// Lets backends rescale submissions into their standard ranges.
    #[must_use]
    pub fn with_auto_scale(mut self, auto_scale: bool) -> Self {
        self.auto_scale = auto_scale;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the plot directory, relative to the output root given to
    /// [`run`](super::run).
    #[must_use]
    pub fn with_plot_dir(mut self, plot_dir: impl Into<PathBuf>) -> Self {
        self.plot_dir = plot_dir.into();
        self
    }

    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    #[must_use]
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn chain_strength(&self) -> f64 {
        self.chain_strength
    }

    #[must_use]
    pub fn num_reads(&self) -> usize {
        self.num_reads
    }

    #[must_use]
    pub fn auto_scale(&self) -> bool {
        self.auto_scale
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn plot_dir(&self) -> &Path {
        &self.plot_dir
    }
}
