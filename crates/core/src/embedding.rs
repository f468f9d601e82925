use std::collections::{BTreeMap, VecDeque};

use thiserror::Error;

use crate::Graph;

/// Reasons an [`Embedding`] fails to be a valid minor embedding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidEmbedding {
    #[error("source node {0} has no chain")]
    MissingChain(usize),

    #[error("chain for source node {0} is empty")]
    EmptyChain(usize),

    #[error("chain for source node {source_node} uses target node {target_node}, which does not exist")]
    InvalidTargetNode {
        source_node: usize,
        target_node: usize,
    },

    #[error("chain for source node {0} is not connected")]
    DisconnectedChain(usize),

    #[error("target node {target_node} is used by chains {first} and {second}")]
    Overlap {
        target_node: usize,
        first: usize,
        second: usize,
    },

    #[error("no coupler connects the chains of source edge ({0}, {1})")]
    MissingCoupler(usize, usize),
}

/// A mapping from source variables to chains of target nodes.
///
/// Each chain is the set of physical nodes that together represent one
/// logical variable. Chains are kept in ascending source-variable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embedding {
    chains: BTreeMap<usize, Vec<usize>>,
}

impl Embedding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chain for `variable`, replacing any previous chain.
    pub fn insert(&mut self, variable: usize, chain: Vec<usize>) {
        self.chains.insert(variable, chain);
    }

    #[must_use]
    pub fn chain(&self, variable: usize) -> Option<&[usize]> {
        self.chains.get(&variable).map(Vec::as_slice)
    }

    /// Iterates over `(variable, chain)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.chains.iter().map(|(&v, chain)| (v, chain.as_slice()))
    }

    /// Returns the length of every chain in variable order.
    #[must_use]
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.chains.values().map(Vec::len).collect()
    }

    /// Returns the total number of target nodes used across all chains.
    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.chains.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Checks that this is a valid minor embedding of `source` into `target`.
    ///
    /// Every source node needs a non-empty, connected chain of existing
    /// target nodes. Chains may not share target nodes, and every source
    /// edge needs at least one target edge between the two chains.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn verify(&self, source: &Graph, target: &Graph) -> Result<(), InvalidEmbedding> {
        let mut owner: Vec<Option<usize>> = vec![None; target.num_nodes()];

        for variable in 0..source.num_nodes() {
            let chain = self
                .chain(variable)
                .ok_or(InvalidEmbedding::MissingChain(variable))?;
            if chain.is_empty() {
                return Err(InvalidEmbedding::EmptyChain(variable));
            }
            for &node in chain {
                let slot = owner
                    .get_mut(node)
                    .ok_or(InvalidEmbedding::InvalidTargetNode {
                        source_node: variable,
                        target_node: node,
                    })?;
                if let Some(first) = *slot {
                    return Err(InvalidEmbedding::Overlap {
                        target_node: node,
                        first,
                        second: variable,
                    });
                }
                *slot = Some(variable);
            }
            if !is_connected(chain, target) {
                return Err(InvalidEmbedding::DisconnectedChain(variable));
            }
        }

        for (u, v) in source.edges() {
            let covered = self.chains[&u].iter().any(|&p| {
                target
                    .neighbors(p)
                    .iter()
                    .any(|&q| owner[q] == Some(v))
            });
            if !covered {
                return Err(InvalidEmbedding::MissingCoupler(u, v));
            }
        }

        Ok(())
    }
}

impl FromIterator<(usize, Vec<usize>)> for Embedding {
    fn from_iter<I: IntoIterator<Item = (usize, Vec<usize>)>>(iter: I) -> Self {
        Self {
            chains: iter.into_iter().collect(),
        }
    }
}

/// Breadth-first check that `chain` induces a connected subgraph of `target`.
fn is_connected(chain: &[usize], target: &Graph) -> bool {
    let mut seen = vec![false; chain.len()];
    let mut queue = VecDeque::from([0]);
    seen[0] = true;
    let mut reached = 1;

    while let Some(i) = queue.pop_front() {
        for (j, &node) in chain.iter().enumerate() {
            if !seen[j] && target.has_edge(chain[i], node) {
                seen[j] = true;
                reached += 1;
                queue.push_back(j);
            }
        }
    }

    reached == chain.len()
}
