use nae3sat_solvers::sampling::annealing;
use rand_distr::Normal;
use thiserror::Error;

/// Configuration for a [`SimulatedQpu`](super::SimulatedQpu).
#[derive(Debug, Clone, Copy)]
pub struct QpuConfig {
    ice_sigma: f64,
    noise: Normal<f64>,
    annealing: annealing::Config,
}

/// Errors that can occur when validating a [`QpuConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("ice_sigma must be finite and non-negative, got {0}")]
    IceSigma(f64),
}

impl Default for QpuConfig {
    fn default() -> Self {
        Self::new(0.015, annealing::Config::default()).expect("default noise level is valid")
    }
}

impl QpuConfig {
    /// Creates a config with Gaussian control noise of standard deviation
    /// `ice_sigma` on every programmed bias.
    ///
    /// # Errors
    ///
    /// Returns an error if `ice_sigma` is negative or not finite.
    pub fn new(ice_sigma: f64, annealing: annealing::Config) -> Result<Self, ConfigError> {
        if !ice_sigma.is_finite() {
            return Err(ConfigError::IceSigma(ice_sigma));
        }
        let noise = Normal::new(0.0, ice_sigma).map_err(|_| ConfigError::IceSigma(ice_sigma))?;
        Ok(Self {
            ice_sigma,
            noise,
            annealing,
        })
    }

    /// Returns a copy of this config whose anneals are seeded with `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.annealing = self.annealing.with_seed(seed);
        self
    }

    #[must_use]
    pub fn ice_sigma(&self) -> f64 {
        self.ice_sigma
    }

    #[must_use]
    pub fn annealing(&self) -> &annealing::Config {
        &self.annealing
    }

    pub(super) fn noise(&self) -> &Normal<f64> {
        &self.noise
    }
}
