//! Coupler graphs of annealing hardware.
//!
//! Both families are built geometrically. Every qubit is a straight segment
//! on a grid, either vertical or horizontal, and two qubits are coupled when:
//!
//! - they cross at right angles (internal couplers),
//! - they continue one another on the same line (external couplers),
//! - they run side by side as a pair (odd couplers).
//!
//! Qubits are numbered densely in coordinate order, so node `i` of the
//! returned [`Graph`] is the `i`-th qubit.

mod pegasus;
mod zephyr;

pub use pegasus::{pegasus_graph, pegasus_num_qubits};
pub use zephyr::{zephyr_graph, zephyr_num_qubits};

use nae3sat_core::{Graph, GraphError, Topology, TopologyKind};

/// Builds the coupler graph described by `topology`.
///
/// Pegasus expects a shape of `[m]` and Zephyr a shape of `[m, t]`.
///
/// # Errors
///
/// Returns [`TopologyError::Shape`] for a shape of the wrong length.
pub fn build(topology: &Topology) -> Result<Graph, TopologyError> {
    match (topology.kind, topology.shape.as_slice()) {
        (TopologyKind::Pegasus, &[m]) => Ok(pegasus_graph(m)?),
        (TopologyKind::Zephyr, &[m, t]) => Ok(zephyr_graph(m, t)?),
        (kind, shape) => Err(TopologyError::Shape {
            kind,
            shape: shape.to_vec(),
        }),
    }
}

/// Errors that can occur when building a coupler graph.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("{kind} topology does not accept shape {shape:?}")]
    Shape { kind: TopologyKind, shape: Vec<usize> },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_topology() {
        let pegasus = Topology {
            kind: TopologyKind::Pegasus,
            shape: vec![3],
        };
        let zephyr = Topology {
            kind: TopologyKind::Zephyr,
            shape: vec![2, 2],
        };

        assert_eq!(build(&pegasus).unwrap().num_nodes(), pegasus_num_qubits(3));
        assert_eq!(build(&zephyr).unwrap().num_nodes(), zephyr_num_qubits(2, 2));
    }

    #[test]
    fn rejects_mismatched_shape() {
        let topology = Topology {
            kind: TopologyKind::Zephyr,
            shape: vec![4],
        };

        assert_eq!(
            build(&topology),
            Err(TopologyError::Shape {
                kind: TopologyKind::Zephyr,
                shape: vec![4],
            })
        );
    }
}
