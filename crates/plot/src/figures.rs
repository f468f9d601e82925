use std::collections::BTreeMap;

use crate::{Figure, FigureConfig};

/// Identifies a figure by what it shows and the clause ratio it covers.
///
/// Ratios are keyed by `trunc(rho * 100)`, so ratios that agree to two
/// decimal places share a figure and a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FigureKey {
    ChainLength(i64),
    Energies(i64),
}

impl FigureKey {
    #[must_use]
    pub fn chain_length(rho: f64) -> Self {
        Self::ChainLength(percent(rho))
    }

    #[must_use]
    pub fn energies(rho: f64) -> Self {
        Self::Energies(percent(rho))
    }

    /// Returns the PNG file name for this figure.
    #[must_use]
    pub fn file_name(&self) -> String {
        match self {
            Self::ChainLength(percent) => format!("rho_{percent}_chain_length.png"),
            Self::Energies(percent) => format!("rho_{percent}_energies.png"),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn percent(rho: f64) -> i64 {
    (rho * 100.0) as i64
}

/// Figures that stay open across a run, looked up by key.
///
/// Requesting a key that already exists returns the existing figure, so
/// series from different steps accumulate on the same axes.
#[derive(Debug, Clone, Default)]
pub struct Figures {
    figures: BTreeMap<FigureKey, Figure>,
}

impl Figures {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the figure for `key`, creating it from `config` if needed.
    pub fn figure(&mut self, key: FigureKey, config: impl FnOnce() -> FigureConfig) -> &mut Figure {
        self.figures
            .entry(key)
            .or_insert_with(|| Figure::new(config()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}
