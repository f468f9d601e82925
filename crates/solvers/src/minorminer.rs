//! Heuristic minor embedding by negotiated path routing.
//!
//! # Algorithm
//!
//! Each attempt places source nodes one at a time in a randomized
//! breadth-first order. A node's chain is rooted at the target node that
//! minimizes the weighted shortest-path distance to the chains of its
//! already placed neighbors, then grows a path to each neighbor from the
//! cheapest point of the chain built so far.
//!
//! In the **overlap** phase chains may share target nodes. A node costs
//! `(1 + history) * penalty^usage`, where `usage` counts the chains on it
//! and `history` accumulates how contested it has been in past rounds. Each
//! path to a neighbor is split, with the far half joining the neighbor's
//! chain, so crowded chains can grow outward. After every round the penalty
//! grows, shared nodes gain history, and every chain touching a shared node
//! is ripped up and rerouted. Branches that no longer link to a neighbor
//! are pruned.
//!
//! Once no target node is shared, the **refine** phase forbids sharing
//! outright and reroutes every chain each round, keeping the embedding with
//! the fewest target nodes until [`Config::chainlength_patience`] rounds
//! pass without improvement.
//!
//! An attempt is abandoned if overlap has not dropped for
//! [`Config::overlap_patience`] rounds or is still present after
//! [`Config::max_rounds`] rounds. The next attempt starts from a fresh
//! placement.
//!
//! # Observer Events
//!
//! The search emits one [`Event`] per completed round. Observers can return
//! [`Action::StopEarly`] to end the search: the best overlap-free embedding
//! is returned if one exists, otherwise the search fails with
//! [`Error::Stopped`].

mod action;
mod config;
mod error;
mod event;
mod route;
mod solution;
mod state;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::{Event, Phase};
pub use solution::{Solution, Status};

use std::collections::VecDeque;

use nae3sat_core::{Embedder, Embedding, Graph, Observer};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use route::{Router, Weights};
use state::State;

/// Penalties above this are indistinguishable from forbidding overlap, and
/// capping them keeps `penalty^usage` finite.
const MAX_PENALTY: f64 = 1e6;

/// History added to a shared target node per extra chain per round.
const HISTORY_STEP: f64 = 1.0;

/// Finds a minor embedding of `source` into `target`.
///
/// The observer receives an [`Event`] after every round of every attempt.
/// See the [module docs](self) for the algorithm and observer actions.
///
/// # Errors
///
/// Returns an error if the target has fewer nodes than the source, if no
/// attempt produces an overlap-free embedding, or if the observer stops the
/// search before one exists.
pub fn find_embedding<Obs>(
    source: &Graph,
    target: &Graph,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    Obs: Observer<Event, Action>,
{
    if source.num_nodes() > target.num_nodes() {
        return Err(Error::TargetTooSmall {
            source_nodes: source.num_nodes(),
            target_nodes: target.num_nodes(),
        });
    }
    if source.num_nodes() == 0 {
        return Ok(Solution {
            status: Status::Converged,
            embedding: Embedding::new(),
            attempts: 0,
            rounds: 0,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed());
    let mut router = Router::new(target);

    for attempt in 0..config.tries() {
        match run_attempt(source, &mut router, config, attempt, &mut observer, &mut rng)? {
            Some((embedding, status, rounds)) => {
                embedding.verify(source, target)?;
                return Ok(Solution {
                    status,
                    embedding,
                    attempts: attempt + 1,
                    rounds,
                });
            }
            None => debug!(attempt, "embedding attempt failed to remove overlap"),
        }
    }

    Err(Error::NotFound {
        tries: config.tries(),
    })
}

/// Finds a minor embedding without observer support.
///
/// This is a convenience wrapper around [`find_embedding`] that uses a no-op
/// observer.
///
/// # Errors
///
/// Returns an error if no embedding can be found.
pub fn find_embedding_unobserved(
    source: &Graph,
    target: &Graph,
    config: &Config,
) -> Result<Solution, Error> {
    find_embedding(source, target, config, ())
}

/// An [`Embedder`] backed by [`find_embedding`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MinorMiner {
    config: Config,
}

impl MinorMiner {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Embedder for MinorMiner {
    type Error = Error;

    fn find_embedding(&self, source: &Graph, target: &Graph) -> Result<Embedding, Self::Error> {
        let solution = find_embedding_unobserved(source, target, &self.config)?;
        debug!(
            attempts = solution.attempts,
            rounds = solution.rounds,
            qubits = solution.embedding.num_qubits(),
            status = ?solution.status,
            "embedding found"
        );
        Ok(solution.embedding)
    }
}

type AttemptResult = Option<(Embedding, Status, usize)>;

/// Runs one attempt, returning `None` if overlap could not be removed.
fn run_attempt<Obs, R>(
    source: &Graph,
    router: &mut Router<'_>,
    config: &Config,
    attempt: usize,
    observer: &mut Obs,
    rng: &mut R,
) -> Result<AttemptResult, Error>
where
    Obs: Observer<Event, Action>,
    R: Rng,
{
    let target = router.target();
    let mut state = State::new(source.num_nodes(), target.num_nodes());
    let mut order = placement_order(source, rng);
    let mut penalty = config.initial_penalty();

    for &v in &order {
        let weights = Weights::Negotiated(penalty);
        if !router.route(v, source.neighbors(v), &mut state, weights, rng) {
            return Ok(None);
        }
        state.prune_around(v, source, target);
    }

    let mut round = 1;
    let mut best_overlap = usize::MAX;
    let mut stale = 0;
    loop {
        let overlap = state.overlapping_qubits();
        debug!(
            attempt,
            round,
            overlap,
            qubits = state.total_qubits(),
            penalty,
            "embedding round"
        );
        let event = event(attempt, round, Phase::Overlap, &state);
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return if overlap == 0 {
                Ok(Some((state.to_embedding(), Status::StoppedByObserver, round)))
            } else {
                Err(Error::Stopped)
            };
        }
        if overlap == 0 {
            break;
        }

        if overlap < best_overlap {
            best_overlap = overlap;
            stale = 0;
        } else {
            stale += 1;
        }
        if stale > config.overlap_patience() || round >= config.max_rounds() {
            debug!(attempt, round, best_overlap, "overlap stopped shrinking");
            return Ok(None);
        }

        round += 1;
        state.record_congestion(HISTORY_STEP);
        penalty = (penalty * config.penalty_growth()).min(MAX_PENALTY);

        let mut congested: Vec<usize> = (0..source.num_nodes())
            .filter(|&v| state.is_congested(v))
            .collect();
        congested.shuffle(rng);
        for v in congested {
            reroute(source, router, &mut state, v, Weights::Negotiated(penalty), rng);
        }
    }

    refine(source, router, config, attempt, round, state, &mut order, observer, rng)
        .map(Some)
}

/// Shortens chains while keeping them disjoint.
#[allow(clippy::too_many_arguments)]
fn refine<Obs, R>(
    source: &Graph,
    router: &mut Router<'_>,
    config: &Config,
    attempt: usize,
    mut round: usize,
    mut state: State,
    order: &mut [usize],
    observer: &mut Obs,
    rng: &mut R,
) -> Result<(Embedding, Status, usize), Error>
where
    Obs: Observer<Event, Action>,
    R: Rng,
{
    let mut best = state.to_embedding();
    let mut best_total = state.total_qubits();
    let mut stale = 0;

    while stale < config.chainlength_patience() {
        if round >= config.max_rounds() {
            return Ok((best, Status::MaxRounds, round));
        }
        round += 1;

        order.shuffle(rng);
        for &v in order.iter() {
            reroute(source, router, &mut state, v, Weights::Forbid, rng);
        }

        let total = state.total_qubits();
        debug!(
            attempt,
            round,
            qubits = total,
            max_chain = state.max_chain_length(),
            "refinement round"
        );
        if total < best_total {
            best = state.to_embedding();
            best_total = total;
            stale = 0;
        } else {
            stale += 1;
        }

        let event = event(attempt, round, Phase::Refine, &state);
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok((best, Status::StoppedByObserver, round));
        }
    }

    Ok((best, Status::Converged, round))
}

/// Rips up the chain of `v` and routes it again, keeping the old chain if
/// no new one exists.
fn reroute<R: Rng>(
    source: &Graph,
    router: &mut Router<'_>,
    state: &mut State,
    v: usize,
    weights: Weights,
    rng: &mut R,
) {
    let old = state.remove(v);
    if !router.route(v, source.neighbors(v), state, weights, rng) {
        state.assign(v, old);
    }
    state.prune_around(v, source, router.target());
}

fn event(attempt: usize, round: usize, phase: Phase, state: &State) -> Event {
    Event {
        attempt,
        round,
        phase,
        overlapping_qubits: state.overlapping_qubits(),
        total_qubits: state.total_qubits(),
        max_chain_length: state.max_chain_length(),
    }
}

/// Orders source nodes breadth-first from random roots, visiting each
/// node's neighbors in random order so that placed neighbors cluster.
fn placement_order<R: Rng>(source: &Graph, rng: &mut R) -> Vec<usize> {
    let n = source.num_nodes();
    let mut starts: Vec<usize> = (0..n).collect();
    starts.shuffle(rng);

    let mut seen = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut queue = VecDeque::new();
    let mut scratch = Vec::new();

    for start in starts {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            scratch.clear();
            scratch.extend(source.neighbors(v).iter().copied().filter(|&u| !seen[u]));
            scratch.shuffle(rng);
            for &u in &scratch {
                seen[u] = true;
                queue.push_back(u);
            }
        }
    }

    order
}
