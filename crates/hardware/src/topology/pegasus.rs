use nae3sat_core::{Graph, GraphError};

/// Tracks per tile in each orientation, and the span of one qubit in units.
const TILE: usize = 12;

/// Where each vertical track starts within its tile, indexed by track.
const VERTICAL_OFFSETS: [usize; TILE] = [2, 2, 2, 2, 10, 10, 10, 10, 6, 6, 6, 6];

/// Where each horizontal track starts within its tile, indexed by track.
const HORIZONTAL_OFFSETS: [usize; TILE] = [6, 6, 6, 6, 2, 2, 2, 2, 10, 10, 10, 10];

/// Tracks in the outermost tiles that no perpendicular qubit ever crosses.
///
/// These qubits sit outside the usable fabric and are left out of the graph.
const FABRIC_START: usize = 2;
const FABRIC_END: usize = 10;

/// A qubit in `(u, w, k, z)` coordinates.
///
/// `u` is the orientation (0 vertical, 1 horizontal), `w` the tile column
/// perpendicular to the qubit, `k` the track within the tile, and `z` the
/// tile offset along the qubit.
#[derive(Debug, Clone, Copy)]
struct Qubit {
    u: usize,
    w: usize,
    k: usize,
    z: usize,
}

/// Maps coordinates of a `P(m)` lattice to dense fabric labels.
struct Lattice {
    m: usize,
    labels: Vec<Option<usize>>,
    len: usize,
}

impl Lattice {
    fn new(m: usize) -> Self {
        let mut labels = Vec::with_capacity(2 * m * TILE * (m - 1));
        let mut len = 0;
        for _u in 0..2 {
            for w in 0..m {
                for k in 0..TILE {
                    let in_fabric =
                        !((w == 0 && k < FABRIC_START) || (w == m - 1 && k >= FABRIC_END));
                    for _z in 0..m - 1 {
                        labels.push(in_fabric.then_some(len));
                        len += usize::from(in_fabric);
                    }
                }
            }
        }
        Self { m, labels, len }
    }

    fn label(&self, q: Qubit) -> Option<usize> {
        self.labels[((q.u * self.m + q.w) * TILE + q.k) * (self.m - 1) + q.z]
    }

    /// Adds the coupler `a`-`b` if both qubits are in the fabric.
    fn couple(&self, graph: &mut Graph, a: Qubit, b: Qubit) -> Result<(), GraphError> {
        if let (Some(p), Some(q)) = (self.label(a), self.label(b)) {
            graph.add_edge(p, q)?;
        }
        Ok(())
    }
}

/// Returns the number of fabric qubits in a `P(m)` Pegasus lattice.
#[must_use]
pub fn pegasus_num_qubits(m: usize) -> usize {
    if m < 2 { 0 } else { (m - 1) * (2 * TILE * m - 8) }
}

/// Builds the coupler graph of a `P(m)` Pegasus lattice.
///
/// Qubits are 12 units long and are laid out in `m x m` tiles of 12 tracks
/// per orientation. Vertical and horizontal tracks are shifted by
/// per-track offsets, so each qubit crosses 12 perpendicular qubits. Each
/// interior qubit has degree 15: 12 internal, 2 external, and 1 odd coupler.
///
/// # Errors
///
/// Returns an error only if the generated coordinates are inconsistent,
/// which indicates a bug in the lattice construction.
pub fn pegasus_graph(m: usize) -> Result<Graph, GraphError> {
    if m < 2 {
        return Ok(Graph::new(0));
    }
    let lattice = Lattice::new(m);
    let mut graph = Graph::new(lattice.len);

    for u in 0..2 {
        for w in 0..m {
            for k in 0..TILE {
                for z in 0..m - 1 {
                    let q = Qubit { u, w, k, z };
                    if z + 2 < m {
                        lattice.couple(&mut graph, q, Qubit { z: z + 1, ..q })?;
                    }
                    if k % 2 == 0 {
                        lattice.couple(&mut graph, q, Qubit { k: k + 1, ..q })?;
                    }
                }
            }
        }
    }

    // A vertical qubit in column 12w + k spans rows 12z + VERTICAL_OFFSETS[k]
    // onward; a horizontal qubit in row 12w' + k' spans columns
    // 12z' + HORIZONTAL_OFFSETS[k'] onward. Solving for the crossing tile
    // gives the horizontal partner's coordinates directly.
    for w in 0..m {
        for k in 0..TILE {
            for z in 0..m - 1 {
                let vertical = Qubit { u: 0, w, k, z };
                for kk in 0..TILE {
                    let hw = z + usize::from(kk < VERTICAL_OFFSETS[k]);
                    let Some(hz) = w.checked_sub(usize::from(k < HORIZONTAL_OFFSETS[kk])) else {
                        continue;
                    };
                    if hw < m && hz < m - 1 {
                        let horizontal = Qubit {
                            u: 1,
                            w: hw,
                            k: kk,
                            z: hz,
                        };
                        lattice.couple(&mut graph, vertical, horizontal)?;
                    }
                }
            }
        }
    }

    Ok(graph)
}
