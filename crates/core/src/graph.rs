use thiserror::Error;

/// Errors that can occur when building a [`Graph`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { node: usize, num_nodes: usize },

    #[error("self-loop on node {0}")]
    SelfLoop(usize),
}

/// An undirected simple graph over dense node indices `0..n`.
///
/// Adjacency lists are kept sorted and free of duplicates, so iteration order
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    num_edges: usize,
}

impl Graph {
    /// Creates a graph with `num_nodes` isolated nodes.
    #[must_use]
    pub fn new(num_nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_nodes],
            num_edges: 0,
        }
    }

    /// Creates a graph from an edge list.
    ///
    /// Duplicate edges are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge references a node outside `0..num_nodes`
    /// or connects a node to itself.
    pub fn from_edges<I>(num_nodes: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(num_nodes);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Adds an undirected edge, returning `true` if it was not already present.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is out of range or `u == v`.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError> {
        let num_nodes = self.num_nodes();
        for node in [u, v] {
            if node >= num_nodes {
                return Err(GraphError::NodeOutOfRange { node, num_nodes });
            }
        }
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }

        let Err(pos) = self.adjacency[u].binary_search(&v) else {
            return Ok(false);
        };
        self.adjacency[u].insert(pos, v);
        if let Err(pos) = self.adjacency[v].binary_search(&u) {
            self.adjacency[v].insert(pos, u);
        }
        self.num_edges += 1;
        Ok(true)
    }

    /// Returns `true` if `u` and `v` are adjacent.
    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency
            .get(u)
            .is_some_and(|adj| adj.binary_search(&v).is_ok())
    }

    /// Returns the sorted neighbors of `node`, or an empty slice if out of range.
    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Iterates over each edge once as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, adj)| {
            adj.iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }
}
