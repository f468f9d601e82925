//! Random not-all-equal 3-SAT problems.
//!
//! Each clause picks three distinct variables and a random sign for each
//! literal. A clause is satisfied unless all three literals take the same
//! value. With spins `s` and literal signs `c`, the clause contributes
//!
//! ```text
//! c_a c_b s_a s_b + c_a c_c s_a s_c + c_b c_c s_b s_c
//! ```
//!
//! which is `-1` when the clause is satisfied and `+3` when it is not. The
//! ground-state energy of a fully satisfiable instance is therefore
//! `-num_clauses`.

use nae3sat_core::{Bqm, ProblemGenerator, ProblemSpec};
use rand::{Rng, SeedableRng, seq::index};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Number of literals per clause.
const CLAUSE_SIZE: usize = 3;

/// Errors that can occur when generating an NAE3SAT problem.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("clauses need 3 distinct variables, but only {0} were requested")]
    TooFewVariables(usize),
}

/// Generates random NAE3SAT problems from a [`ProblemSpec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nae3sat {
    plant_solution: bool,
}

impl Nae3sat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses literal signs so that the all-up assignment satisfies every
    /// clause, guaranteeing a ground state at `-num_clauses`.
    #[must_use]
    pub fn planted(mut self) -> Self {
        self.plant_solution = true;
        self
    }
}

impl ProblemGenerator for Nae3sat {
    type Error = Error;

    fn generate(&self, spec: &ProblemSpec) -> Result<Bqm, Self::Error> {
        random_nae3sat(
            spec.num_variables,
            spec.num_clauses,
            spec.seed,
            self.plant_solution,
        )
    }
}

/// Generates a random NAE3SAT problem as a spin-valued model.
///
/// Every variable in `0..num_variables` is present in the model, including
/// variables that appear in no clause. Interactions from different clauses
/// that share a variable pair accumulate.
///
/// # Errors
///
/// Returns [`Error::TooFewVariables`] if clauses are requested with fewer
/// than three variables.
pub fn random_nae3sat(
    num_variables: usize,
    num_clauses: usize,
    seed: u64,
    plant_solution: bool,
) -> Result<Bqm, Error> {
    if num_clauses > 0 && num_variables < CLAUSE_SIZE {
        return Err(Error::TooFewVariables(num_variables));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut bqm = Bqm::with_variables(num_variables);

    for _ in 0..num_clauses {
        let variables = index::sample(&mut rng, num_variables, CLAUSE_SIZE).into_vec();
        let mut signs: [f64; CLAUSE_SIZE] =
            std::array::from_fn(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 });

        if plant_solution && signs.iter().all(|&s| s == signs[0]) {
            let flip = rng.gen_range(0..CLAUSE_SIZE);
            signs[flip] = -signs[flip];
        }

        for a in 0..CLAUSE_SIZE {
            for b in a + 1..CLAUSE_SIZE {
                bqm.add_quadratic(variables[a], variables[b], signs[a] * signs[b])
                    .expect("clause variables are distinct");
            }
        }
    }

    Ok(bqm)
}
