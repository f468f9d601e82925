use thiserror::Error;

/// Configuration for the embedding search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tries: usize,
    max_rounds: usize,
    chainlength_patience: usize,
    overlap_patience: usize,
    initial_penalty: f64,
    penalty_growth: f64,
    seed: u64,
}

/// Errors that can occur when validating an embedding search config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tries must be at least 1")]
    Tries,

    #[error("max_rounds must be at least 1")]
    Rounds,

    #[error("initial_penalty must be finite and greater than 1")]
    Penalty,

    #[error("penalty_growth must be finite and greater than 1")]
    Growth,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(10, 64, 3, 2.0, 1.6).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated limits and penalties.
    ///
    /// An attempt is abandoned once 12 rounds pass without reducing overlap;
    /// see [`Config::with_overlap_patience`]. The seed defaults to zero; see
    /// [`Config::with_seed`].
    ///
    /// # Errors
    ///
    /// Returns an error if `tries` or `max_rounds` is zero, or if a penalty
    /// parameter is not finite and greater than one.
    pub fn new(
        tries: usize,
        max_rounds: usize,
        chainlength_patience: usize,
        initial_penalty: f64,
        penalty_growth: f64,
    ) -> Result<Self, ConfigError> {
        if tries == 0 {
            return Err(ConfigError::Tries);
        }
        if max_rounds == 0 {
            return Err(ConfigError::Rounds);
        }
        if !initial_penalty.is_finite() || initial_penalty <= 1.0 {
            return Err(ConfigError::Penalty);
        }
        if !penalty_growth.is_finite() || penalty_growth <= 1.0 {
            return Err(ConfigError::Growth);
        }

        Ok(Self {
            tries,
            max_rounds,
            chainlength_patience,
            overlap_patience: 12,
            initial_penalty,
            penalty_growth,
            seed: 0,
        })
    }

    /// Returns a copy of this config that abandons an attempt once `rounds`
    /// rounds pass without reducing the number of shared target nodes.
    #[must_use]
    pub fn with_overlap_patience(mut self, rounds: usize) -> Self {
        self.overlap_patience = rounds;
        self
    }

    /// Returns a copy of this config that seeds the search with `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the number of independent attempts before giving up.
    #[must_use]
    pub fn tries(&self) -> usize {
        self.tries
    }

    /// Returns the round limit per attempt, shared by both phases.
    #[must_use]
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Returns how many refinement rounds may pass without shortening chains.
    #[must_use]
    pub fn chainlength_patience(&self) -> usize {
        self.chainlength_patience
    }

    /// Returns how many overlap rounds may pass without reducing overlap.
    #[must_use]
    pub fn overlap_patience(&self) -> usize {
        self.overlap_patience
    }

    /// Returns the overlap penalty used in the first round.
    #[must_use]
    pub fn initial_penalty(&self) -> f64 {
        self.initial_penalty
    }

    /// Returns the factor applied to the overlap penalty after each round.
    #[must_use]
    pub fn penalty_growth(&self) -> f64 {
        self.penalty_growth
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
