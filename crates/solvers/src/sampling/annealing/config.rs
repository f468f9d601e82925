use thiserror::Error;

/// Configuration for simulated annealing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    num_sweeps: usize,
    beta_range: [f64; 2],
    seed: Option<u64>,
}

/// Errors that can occur when validating an annealing config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("num_sweeps must be at least 1")]
    Sweeps,

    #[error("beta_range must be finite, positive, and ascending")]
    BetaRange,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1000, [0.1, 8.0]).unwrap()
    }
}

impl Config {
    /// Creates a new unseeded config with a validated schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_sweeps` is zero or `beta_range` is not a
    /// finite, positive, ascending pair.
    pub fn new(num_sweeps: usize, beta_range: [f64; 2]) -> Result<Self, ConfigError> {
        if num_sweeps == 0 {
            return Err(ConfigError::Sweeps);
        }
        let [lo, hi] = beta_range;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
            return Err(ConfigError::BetaRange);
        }

        Ok(Self {
            num_sweeps,
            beta_range,
            seed: None,
        })
    }

    /// Returns a copy of this config that seeds every run with `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn num_sweeps(&self) -> usize {
        self.num_sweeps
    }

    /// Returns the inverse temperatures of the first and last sweep.
    #[must_use]
    pub fn beta_range(&self) -> [f64; 2] {
        self.beta_range
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns one inverse temperature per sweep, spaced geometrically.
    #[must_use]
    pub fn schedule(&self) -> Vec<f64> {
        let [lo, hi] = self.beta_range;
        if self.num_sweeps == 1 {
            return vec![hi];
        }
        let last = (self.num_sweeps - 1) as f64;
        (0..self.num_sweeps)
            .map(|k| lo * (hi / lo).powf(k as f64 / last))
            .collect()
    }
}
