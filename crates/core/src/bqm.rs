use std::collections::BTreeMap;

use thiserror::Error;

use crate::Graph;

/// Errors that can occur when building or evaluating a [`Bqm`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BqmError {
    #[error("interaction ({0}, {0}) is a self-loop")]
    SelfLoop(usize),

    #[error("assignment is missing variable {0}")]
    MissingVariable(usize),

    #[error("assignment has {values} values for {variables} variables")]
    LengthMismatch { variables: usize, values: usize },

    #[error("labels must be contiguous from zero, found {label} in a model of {num_variables}")]
    NonContiguousLabels { label: usize, num_variables: usize },
}

/// A spin-valued binary quadratic model.
///
/// The energy of an assignment `s` with `s_v ∈ {-1, +1}` is
///
/// ```text
/// E(s) = offset + Σ h_v s_v + Σ J_uv s_u s_v
/// ```
///
/// Interactions are stored once, keyed by `(u, v)` with `u < v`, and adding
/// an interaction that already exists accumulates its bias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bqm {
    linear: BTreeMap<usize, f64>,
    quadratic: BTreeMap<(usize, usize), f64>,
    offset: f64,
}

/// Minimum and maximum linear and quadratic biases of a [`Bqm`].
///
/// Missing terms count as zero, matching how normalization treats them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasExtrema {
    pub linear: [f64; 2],
    pub quadratic: [f64; 2],
}

impl Bqm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model with variables `0..num_variables` and no biases.
    #[must_use]
    pub fn with_variables(num_variables: usize) -> Self {
        Self {
            linear: (0..num_variables).map(|v| (v, 0.0)).collect(),
            ..Self::default()
        }
    }

    /// Adds `v` with a zero bias if it is not already present.
    pub fn add_variable(&mut self, v: usize) {
        self.linear.entry(v).or_insert(0.0);
    }

    pub fn add_linear(&mut self, v: usize, bias: f64) {
        *self.linear.entry(v).or_insert(0.0) += bias;
    }

    /// Adds `bias` to the interaction between `u` and `v`.
    ///
    /// Both variables are added to the model if missing.
    ///
    /// # Errors
    ///
    /// Returns [`BqmError::SelfLoop`] if `u == v`.
    pub fn add_quadratic(&mut self, u: usize, v: usize, bias: f64) -> Result<(), BqmError> {
        if u == v {
            return Err(BqmError::SelfLoop(u));
        }
        self.add_variable(u);
        self.add_variable(v);
        *self.quadratic.entry(ordered(u, v)).or_insert(0.0) += bias;
        Ok(())
    }

    pub fn add_offset(&mut self, offset: f64) {
        self.offset += offset;
    }

    /// Returns the linear bias of `v`, or `None` if `v` is not in the model.
    #[must_use]
    pub fn linear(&self, v: usize) -> Option<f64> {
        self.linear.get(&v).copied()
    }

    /// Returns the interaction bias between `u` and `v` in either order.
    #[must_use]
    pub fn quadratic(&self, u: usize, v: usize) -> Option<f64> {
        self.quadratic.get(&ordered(u, v)).copied()
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Iterates over the variables in ascending order with their linear biases.
    pub fn linear_terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.linear.iter().map(|(&v, &bias)| (v, bias))
    }

    /// Iterates over the variables in ascending order.
    pub fn variables(&self) -> impl Iterator<Item = usize> + '_ {
        self.linear.keys().copied()
    }

    /// Iterates over interactions as `(u, v, bias)` with `u < v`.
    pub fn interactions(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.quadratic.iter().map(|(&(u, v), &bias)| (u, v, bias))
    }

    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    #[must_use]
    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    /// Computes the energy of an assignment.
    ///
    /// `variables` must be sorted ascending and aligned with `values`.
    /// Variables in the assignment but not in the model are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ or a model variable is missing
    /// from the assignment.
    pub fn energy(&self, variables: &[usize], values: &[i8]) -> Result<f64, BqmError> {
        if variables.len() != values.len() {
            return Err(BqmError::LengthMismatch {
                variables: variables.len(),
                values: values.len(),
            });
        }
        let spin = |v: usize| -> Result<f64, BqmError> {
            variables
                .binary_search(&v)
                .map(|i| f64::from(values[i]))
                .map_err(|_| BqmError::MissingVariable(v))
        };

        let mut energy = self.offset;
        for (&v, &bias) in &self.linear {
            energy += bias * spin(v)?;
        }
        for (&(u, v), &bias) in &self.quadratic {
            energy += bias * spin(u)? * spin(v)?;
        }
        Ok(energy)
    }

    /// Multiplies every bias and the offset by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.linear.values_mut().for_each(|b| *b *= factor);
        self.quadratic.values_mut().for_each(|b| *b *= factor);
        self.offset *= factor;
    }

    /// Returns the bias extrema, or `None` for an empty model.
    #[must_use]
    pub fn bias_extrema(&self) -> Option<BiasExtrema> {
        if self.linear.is_empty() {
            return None;
        }
        Some(BiasExtrema {
            linear: extrema(self.linear.values().copied()),
            quadratic: extrema(self.quadratic.values().copied()),
        })
    }

    /// Returns the interaction graph over variables `0..n`.
    ///
    /// # Errors
    ///
    /// Returns an error if the labels are not exactly `0..n`.
    pub fn to_graph(&self) -> Result<Graph, BqmError> {
        let num_variables = self.num_variables();
        if let Some(label) = self.variables().find(|&v| v >= num_variables) {
            return Err(BqmError::NonContiguousLabels {
                label,
                num_variables,
            });
        }

        let mut graph = Graph::new(num_variables);
        for &(u, v) in self.quadratic.keys() {
            graph
                .add_edge(u, v)
                .expect("labels are contiguous and interactions are never self-loops");
        }
        Ok(graph)
    }
}

fn ordered(u: usize, v: usize) -> (usize, usize) {
    if u < v { (u, v) } else { (v, u) }
}

fn extrema(values: impl Iterator<Item = f64>) -> [f64; 2] {
    values.fold([0.0, 0.0], |[lo, hi], b| [lo.min(b), hi.max(b)])
}
