use std::{cmp::Ordering, collections::BinaryHeap};

use nae3sat_core::Graph;
use rand::{Rng, seq::SliceRandom};

use super::state::State;

const NO_PARENT: u32 = u32::MAX;

/// How the router prices target nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Weights {
    /// A node costs `(1 + history) * penalty^usage`, where `usage` counts
    /// the chains on it. Paths to neighboring chains are split between the
    /// new chain and the neighbor.
    Negotiated(f64),

    /// Free nodes cost one and nodes used by other chains cannot be entered.
    Forbid,
}

impl Weights {
    fn cost(self, usage: u32, history: f64) -> f64 {
        match self {
            Self::Negotiated(penalty) => {
                (1.0 + history) * penalty.powi(i32::try_from(usage).unwrap_or(i32::MAX))
            }
            Self::Forbid if usage == 0 => 1.0,
            Self::Forbid => f64::INFINITY,
        }
    }

    fn splits_paths(self) -> bool {
        matches!(self, Self::Negotiated(_))
    }
}

/// Routes new chains through a target graph by weighted shortest paths.
///
/// Buffers are reused between calls, since a search routes many chains per
/// round.
pub(super) struct Router<'t> {
    target: &'t Graph,
    cost: Vec<f64>,
    totals: Vec<f64>,
    dist: Vec<Vec<f64>>,
    parent: Vec<Vec<u32>>,
    heap: BinaryHeap<Entry>,
    path: Vec<usize>,
}

impl<'t> Router<'t> {
    pub(super) fn new(target: &'t Graph) -> Self {
        let n = target.num_nodes();
        Self {
            target,
            cost: vec![0.0; n],
            totals: vec![0.0; n],
            dist: Vec::new(),
            parent: Vec::new(),
            heap: BinaryHeap::with_capacity(n),
            path: Vec::new(),
        }
    }

    pub(super) fn target(&self) -> &'t Graph {
        self.target
    }

    /// Builds a chain for source node `v`, whose chain must be empty and
    /// whose source neighbors are `neighbors`.
    ///
    /// The chain is rooted at the target node that minimizes its own cost
    /// plus the cost of a shortest path to every placed neighbor's chain.
    /// Neighbors are then linked in random order, each by a path from
    /// whichever node of the growing chain is cheapest to reach. Under
    /// [`Weights::Negotiated`] the half of each path nearest the neighbor
    /// joins the neighbor's chain. A node with no placed neighbors gets the
    /// cheapest single node.
    ///
    /// Returns `false`, leaving `state` untouched, if no root can reach
    /// every placed neighbor.
    pub(super) fn route<R: Rng>(
        &mut self,
        v: usize,
        neighbors: &[usize],
        state: &mut State,
        weights: Weights,
        rng: &mut R,
    ) -> bool {
        let n = self.target.num_nodes();
        if n == 0 {
            return false;
        }
        for (q, cost) in self.cost.iter_mut().enumerate() {
            *cost = weights.cost(state.usage(q), state.history(q));
        }

        let placed: Vec<usize> = neighbors
            .iter()
            .copied()
            .filter(|&u| u != v && state.is_placed(u))
            .collect();
        if placed.is_empty() {
            return match self.cheapest_node(rng) {
                Some(q) => {
                    state.extend(v, q);
                    true
                }
                None => false,
            };
        }

        while self.dist.len() < placed.len() {
            self.dist.push(vec![f64::INFINITY; n]);
            self.parent.push(vec![NO_PARENT; n]);
        }

        self.totals.copy_from_slice(&self.cost);
        for (i, &u) in placed.iter().enumerate() {
            let (dist, parent) = (&mut self.dist[i], &mut self.parent[i]);
            shortest_paths(
                self.target,
                &self.cost,
                state.chain(u),
                dist,
                parent,
                &mut self.heap,
            );
            for q in 0..n {
                self.totals[q] += path_cost(dist, parent, &self.cost, q);
            }
        }

        let root = argmin(&self.totals, rng);
        if !self.totals[root].is_finite() {
            return false;
        }
        state.extend(v, root);

        let mut links: Vec<usize> = (0..placed.len()).collect();
        links.shuffle(rng);
        for i in links {
            let (dist, parent) = (&self.dist[i], &self.parent[i]);
            let attach = state
                .chain(v)
                .iter()
                .copied()
                .min_by(|&a, &b| {
                    path_cost(dist, parent, &self.cost, a)
                        .total_cmp(&path_cost(dist, parent, &self.cost, b))
                })
                .unwrap_or(root);

            // Walk toward the neighbor's chain, restarting whenever the path
            // re-enters the chain being built.
            self.path.clear();
            let mut node = parent[attach];
            while node != NO_PARENT {
                let q = node as usize;
                if parent[q] == NO_PARENT {
                    break;
                }
                if state.contains(v, q) {
                    self.path.clear();
                } else {
                    self.path.push(q);
                }
                node = parent[q];
            }

            let split = if weights.splits_paths() {
                self.path.len().div_ceil(2)
            } else {
                self.path.len()
            };
            for &q in &self.path[..split] {
                state.extend(v, q);
            }
            for &q in &self.path[split..] {
                state.extend(placed[i], q);
            }
        }
        true
    }

    /// Picks the cheapest node, starting the scan at a random offset.
    fn cheapest_node<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let q = argmin(&self.cost, rng);
        self.cost[q].is_finite().then_some(q)
    }
}

/// Cost of the path from a neighbor's chain to `q`, excluding `q` itself.
fn path_cost(dist: &[f64], parent: &[u32], cost: &[f64], q: usize) -> f64 {
    if parent[q] == NO_PARENT && dist[q] == 0.0 {
        0.0
    } else if dist[q].is_finite() {
        dist[q] - cost[q]
    } else {
        f64::INFINITY
    }
}

/// Returns the index of the smallest value, breaking ties by a random
/// starting offset.
fn argmin<R: Rng>(values: &[f64], rng: &mut R) -> usize {
    let n = values.len();
    let offset = rng.gen_range(0..n);
    let mut best = offset;
    for q in (offset..n).chain(0..offset) {
        if values[q] < values[best] {
            best = q;
        }
    }
    best
}

/// Multi-source Dijkstra over node weights.
///
/// Sources start at zero and have no parent. Entering a node costs its
/// weight; nodes with infinite weight are never entered.
fn shortest_paths(
    target: &Graph,
    cost: &[f64],
    sources: &[usize],
    dist: &mut [f64],
    parent: &mut [u32],
    heap: &mut BinaryHeap<Entry>,
) {
    dist.fill(f64::INFINITY);
    parent.fill(NO_PARENT);
    heap.clear();

    for &s in sources {
        dist[s] = 0.0;
        heap.push(Entry { cost: 0.0, node: s });
    }

    while let Some(Entry { cost: d, node: p }) = heap.pop() {
        if d > dist[p] {
            continue;
        }
        for &q in target.neighbors(p) {
            let step = cost[q];
            if !step.is_finite() {
                continue;
            }
            let next = d + step;
            if next < dist[q] {
                dist[q] = next;
                parent[q] = u32::try_from(p).unwrap_or(NO_PARENT);
                heap.push(Entry {
                    cost: next,
                    node: q,
                });
            }
        }
    }
}

/// A min-heap entry ordered by cost, then node.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    cost: f64,
    node: usize,
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
