use nae3sat_core::{Graph, GraphError};

/// A qubit in `(u, w, k, j, z)` coordinates.
///
/// `u` is the orientation, `w` the line perpendicular to the qubit, `k` the
/// track on that line, `j` the half-step shift, and `z` the offset along the
/// qubit. A qubit spans the two perpendicular lines `2z + j` and `2z + j + 1`.
#[derive(Debug, Clone, Copy)]
struct Qubit {
    u: usize,
    w: usize,
    k: usize,
    j: usize,
    z: usize,
}

/// Returns the number of qubits in a `Z(m, t)` Zephyr lattice.
#[must_use]
pub fn zephyr_num_qubits(m: usize, t: usize) -> usize {
    4 * t * m * (2 * m + 1)
}

/// Builds the coupler graph of a `Z(m, t)` Zephyr lattice.
///
/// Each orientation has `2m + 1` lines of `t` tracks, and every track holds
/// two staggered rows of `m` qubits. An interior qubit has degree `4t + 4`:
/// `4t` internal, 2 external, and 2 odd couplers.
///
/// # Errors
///
/// Returns an error only if the generated coordinates are inconsistent,
/// which indicates a bug in the lattice construction.
pub fn zephyr_graph(m: usize, t: usize) -> Result<Graph, GraphError> {
    let lines = 2 * m + 1;
    let label = |q: Qubit| (((q.u * lines + q.w) * t + q.k) * 2 + q.j) * m + q.z;
    let mut graph = Graph::new(zephyr_num_qubits(m, t));

    for u in 0..2 {
        for w in 0..lines {
            for k in 0..t {
                for z in 0..m {
                    for j in 0..2 {
                        let q = Qubit { u, w, k, j, z };
                        if z + 1 < m {
                            graph.add_edge(label(q), label(Qubit { z: z + 1, ..q }))?;
                        }
                    }
                    // The unshifted qubit overlaps the shifted ones at z and z - 1.
                    let q = Qubit { u, w, k, j: 0, z };
                    graph.add_edge(label(q), label(Qubit { j: 1, ..q }))?;
                    if z > 0 {
                        graph.add_edge(label(q), label(Qubit { j: 1, z: z - 1, ..q }))?;
                    }
                }
            }
        }
    }

    for w in 0..lines {
        for k in 0..t {
            for j in 0..2 {
                for z in 0..m {
                    let vertical = Qubit { u: 0, w, k, j, z };
                    for hw in [2 * z + j, 2 * z + j + 1] {
                        // Horizontal qubits starting at line w - 1 or w cross
                        // vertical line w.
                        for start in [w.checked_sub(1), Some(w)].into_iter().flatten() {
                            if start >= 2 * m {
                                continue;
                            }
                            for kk in 0..t {
                                let horizontal = Qubit {
                                    u: 1,
                                    w: hw,
                                    k: kk,
                                    j: start % 2,
                                    z: start / 2,
                                };
                                graph.add_edge(label(vertical), label(horizontal))?;
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(graph)
}
