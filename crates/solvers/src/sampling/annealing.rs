//! Metropolis simulated annealing over spin models.
//!
//! Each read starts from a uniformly random spin state and performs
//! [`Config::num_sweeps`] sweeps. Sweep `k` uses inverse temperature
//! `beta_k`, spaced geometrically across [`Config::beta_range`]. Within a
//! sweep every spin is proposed for a flip once, in variable order, and the
//! flip is accepted with probability `min(1, exp(-beta * ΔE))`.

mod config;

pub use config::{Config, ConfigError};

use nae3sat_core::{Bqm, BqmError, SampleSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A compact adjacency view of a [`Bqm`] for fast local-field updates.
struct Ising {
    variables: Vec<usize>,
    linear: Vec<f64>,
    neighbors: Vec<Vec<(usize, f64)>>,
}

impl Ising {
    fn new(bqm: &Bqm) -> Self {
        let variables: Vec<usize> = bqm.variables().collect();
        let position = |v: usize| {
            variables
                .binary_search(&v)
                .expect("interaction variables are model variables")
        };

        let linear = bqm.linear_terms().map(|(_, h)| h).collect();
        let mut neighbors = vec![Vec::new(); variables.len()];
        for (u, v, bias) in bqm.interactions() {
            let (i, j) = (position(u), position(v));
            neighbors[i].push((j, bias));
            neighbors[j].push((i, bias));
        }

        Self {
            variables,
            linear,
            neighbors,
        }
    }

    fn local_field(&self, spins: &[i8], i: usize) -> f64 {
        self.neighbors[i]
            .iter()
            .fold(self.linear[i], |field, &(j, bias)| {
                field + bias * f64::from(spins[j])
            })
    }
}

/// Runs `num_reads` independent anneals and returns the raw final states.
///
/// The returned variables are sorted ascending and each state is aligned
/// with them.
fn anneal<R: Rng>(
    bqm: &Bqm,
    num_reads: usize,
    config: &Config,
    rng: &mut R,
) -> (Vec<usize>, Vec<Vec<i8>>) {
    let ising = Ising::new(bqm);
    let n = ising.variables.len();
    let betas = config.schedule();

    let reads = (0..num_reads)
        .map(|_| {
            let mut spins: Vec<i8> = (0..n)
                .map(|_| if rng.gen_bool(0.5) { 1 } else { -1 })
                .collect();
            for &beta in &betas {
                for i in 0..n {
                    // Flipping s_i changes the energy by -2 s_i f_i.
                    let delta = -2.0 * f64::from(spins[i]) * ising.local_field(&spins, i);
                    if delta <= 0.0 || rng.gen_range(0.0..1.0) < (-beta * delta).exp() {
                        spins[i] = -spins[i];
                    }
                }
            }
            spins
        })
        .collect();

    (ising.variables, reads)
}

/// A seeded simulated annealing sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Annealer {
    config: Config,
}

impl Annealer {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a generator seeded from [`Config::seed`], or from fresh
    /// entropy when no seed is set.
    #[must_use]
    pub fn rng(&self) -> ChaCha8Rng {
        match self.config.seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Anneals `bqm` and aggregates the reads into a [`SampleSet`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the model cannot evaluate its own samples,
    /// which indicates an internal inconsistency.
    pub fn sample(&self, bqm: &Bqm, num_reads: usize) -> Result<SampleSet, BqmError> {
        let mut rng = self.rng();
        self.sample_scored(bqm, num_reads, &mut rng, |vars, sample| {
            bqm.energy(vars, sample)
        })
    }

    /// Anneals `bqm` with `rng` and scores each distinct read with `energy`.
    ///
    /// Lets a caller anneal a perturbed copy of a model while reporting
    /// energies of the original.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `energy`.
    pub fn sample_scored<R, E, F>(
        &self,
        bqm: &Bqm,
        num_reads: usize,
        rng: &mut R,
        energy: F,
    ) -> Result<SampleSet, E>
    where
        R: Rng,
        F: FnMut(&[usize], &[i8]) -> Result<f64, E>,
    {
        let (variables, reads) = anneal(bqm, num_reads, &self.config, rng);
        SampleSet::from_samples(variables, reads, energy)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// A frustration-free ring: every coupling prefers aligned neighbors.
    fn ferromagnetic_ring(n: usize) -> Bqm {
        let mut bqm = Bqm::with_variables(n);
        for v in 0..n {
            bqm.add_quadratic(v, (v + 1) % n, -1.0).unwrap();
        }
        bqm
    }

    fn seeded(seed: u64) -> Annealer {
        Annealer::new(Config::new(200, [0.1, 5.0]).unwrap().with_seed(seed))
    }

    #[test]
    fn finds_ferromagnetic_ground_state() {
        let bqm = ferromagnetic_ring(12);

        let set = seeded(1).sample(&bqm, 20).unwrap();

        assert_eq!(set.total_reads(), 20);
        assert_relative_eq!(set.lowest().unwrap().energy, -12.0);
    }

    #[test]
    fn follows_linear_bias() {
        let mut bqm = Bqm::new();
        bqm.add_linear(4, 2.0);
        bqm.add_linear(9, -2.0);

        let set = seeded(2).sample(&bqm, 10).unwrap();

        assert_eq!(set.variables(), &[4, 9]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.sample(0), Some(&[-1_i8, 1][..]));
        assert_relative_eq!(set.records()[0].energy, -4.0);
    }

    #[test]
    fn seed_makes_reads_reproducible() {
        let bqm = ferromagnetic_ring(8);

        let first = seeded(7).sample(&bqm, 5).unwrap();
        let second = seeded(7).sample(&bqm, 5).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn scores_reads_with_the_given_energy() {
        // Anneal a field that favors spin up, but report the energy of the
        // opposite field.
        let mut pushed = Bqm::new();
        pushed.add_linear(0, -2.0);
        let mut reported = Bqm::new();
        reported.add_linear(0, 2.0);

        let annealer = seeded(4);
        let mut rng = annealer.rng();
        let set = annealer
            .sample_scored(&pushed, 8, &mut rng, |vars, sample| {
                reported.energy(vars, sample)
            })
            .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.sample(0), Some(&[1_i8][..]));
        assert_relative_eq!(set.records()[0].energy, 2.0);
    }

    #[test]
    fn zero_reads_give_empty_set() {
        let set = seeded(3).sample(&ferromagnetic_ring(4), 0).unwrap();

        assert!(set.is_empty());
        assert_eq!(set.variables(), &[0, 1, 2, 3]);
    }
}
