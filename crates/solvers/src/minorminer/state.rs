use nae3sat_core::{Embedding, Graph};

/// Chains for every source node, the chains holding each target node, and
/// the congestion history of each target node.
#[derive(Debug, Clone)]
pub(super) struct State {
    chains: Vec<Vec<usize>>,
    owners: Vec<Vec<usize>>,
    history: Vec<f64>,
}

impl State {
    pub(super) fn new(source_nodes: usize, target_nodes: usize) -> Self {
        Self {
            chains: vec![Vec::new(); source_nodes],
            owners: vec![Vec::new(); target_nodes],
            history: vec![0.0; target_nodes],
        }
    }

    pub(super) fn chain(&self, v: usize) -> &[usize] {
        &self.chains[v]
    }

    pub(super) fn is_placed(&self, v: usize) -> bool {
        !self.chains[v].is_empty()
    }

    pub(super) fn contains(&self, v: usize, q: usize) -> bool {
        self.owners[q].contains(&v)
    }

    pub(super) fn usage(&self, q: usize) -> u32 {
        u32::try_from(self.owners[q].len()).unwrap_or(u32::MAX)
    }

    /// Accumulated overuse of `q` across past rounds.
    pub(super) fn history(&self, q: usize) -> f64 {
        self.history[q]
    }

    /// Clears the chain of `v`, releasing its target nodes.
    pub(super) fn remove(&mut self, v: usize) -> Vec<usize> {
        let chain = std::mem::take(&mut self.chains[v]);
        for &q in &chain {
            self.owners[q].retain(|&u| u != v);
        }
        chain
    }

    /// Sets the chain of `v`, which must currently be empty.
    pub(super) fn assign(&mut self, v: usize, chain: Vec<usize>) {
        debug_assert!(self.chains[v].is_empty(), "chain {v} assigned twice");
        for q in chain {
            self.extend(v, q);
        }
    }

    /// Adds `q` to the chain of `v` unless it is already there.
    pub(super) fn extend(&mut self, v: usize, q: usize) {
        if !self.contains(v, q) {
            self.chains[v].push(q);
            self.owners[q].push(v);
        }
    }

    /// Whether any target node in the chain of `v` is shared.
    pub(super) fn is_congested(&self, v: usize) -> bool {
        self.chains[v].iter().any(|&q| self.owners[q].len() > 1)
    }

    /// Charges every shared target node `step` per extra chain on it.
    pub(super) fn record_congestion(&mut self, step: f64) {
        for (owners, history) in self.owners.iter().zip(&mut self.history) {
            if owners.len() > 1 {
                #[allow(clippy::cast_precision_loss)]
                let extra = (owners.len() - 1) as f64;
                *history += step * extra;
            }
        }
    }

    /// Drops leaves from the chain of `v` that no neighboring chain needs.
    ///
    /// A leaf is a target node with at most one neighbor inside the chain.
    /// It stays if it is the only node of the chain touching (adjacent to or
    /// shared with) some placed source neighbor. The chain stays connected
    /// and never becomes empty.
    pub(super) fn prune(&mut self, v: usize, source: &Graph, target: &Graph) {
        let mut pruned = true;
        while pruned && self.chains[v].len() > 1 {
            pruned = false;
            let mut i = 0;
            while i < self.chains[v].len() && self.chains[v].len() > 1 {
                let q = self.chains[v][i];
                if self.is_leaf(v, q, target) && !self.is_needed(v, q, source, target) {
                    self.chains[v].swap_remove(i);
                    self.owners[q].retain(|&u| u != v);
                    pruned = true;
                } else {
                    i += 1;
                }
            }
        }
    }

    /// Prunes the chain of `v` and then the chains of its source neighbors,
    /// whose paths toward the old chain of `v` may now lead nowhere.
    pub(super) fn prune_around(&mut self, v: usize, source: &Graph, target: &Graph) {
        self.prune(v, source, target);
        for &u in source.neighbors(v) {
            self.prune(u, source, target);
        }
    }

    fn is_leaf(&self, v: usize, q: usize, target: &Graph) -> bool {
        target
            .neighbors(q)
            .iter()
            .filter(|&&p| self.contains(v, p))
            .take(2)
            .count()
            <= 1
    }

    fn is_needed(&self, v: usize, q: usize, source: &Graph, target: &Graph) -> bool {
        source.neighbors(v).iter().any(|&u| {
            self.is_placed(u)
                && self.touches(q, u, target)
                && !self.chains[v]
                    .iter()
                    .any(|&p| p != q && self.touches(p, u, target))
        })
    }

    /// Whether target node `q` lies in or next to the chain of `u`.
    fn touches(&self, q: usize, u: usize, target: &Graph) -> bool {
        self.contains(u, q) || target.neighbors(q).iter().any(|&p| self.contains(u, p))
    }

    pub(super) fn overlapping_qubits(&self) -> usize {
        self.owners.iter().filter(|owners| owners.len() > 1).count()
    }

    pub(super) fn total_qubits(&self) -> usize {
        self.chains.iter().map(Vec::len).sum()
    }

    pub(super) fn max_chain_length(&self) -> usize {
        self.chains.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub(super) fn to_embedding(&self) -> Embedding {
        self.chains
            .iter()
            .enumerate()
            .map(|(v, chain)| {
                let mut chain = chain.clone();
                chain.sort_unstable();
                (v, chain)
            })
            .collect()
    }
}
