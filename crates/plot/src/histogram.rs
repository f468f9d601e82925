use crate::PlotError;

/// How a [`Histogram`] divides the range of its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bins {
    /// A fixed number of equal-width bins spanning the data.
    ///
    /// If every value is equal, the range is widened by 0.5 on each side.
    Count(usize),

    /// Bins of width one centered on each integer from the rounded minimum
    /// to the rounded maximum.
    UnitWidth,
}

/// Weighted counts over contiguous bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<f64>,
}

impl Histogram {
    /// Bins `values`, each counted with its matching weight or with weight
    /// one when `weights` is `None`.
    ///
    /// Every bin is half-open except the last, which also includes its right
    /// edge.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no values, the weights do not match the
    /// values, a value is not finite, or zero bins are requested.
    pub fn new(values: &[f64], weights: Option<&[f64]>, bins: Bins) -> Result<Self, PlotError> {
        if values.is_empty() {
            return Err(PlotError::Empty);
        }
        match weights {
            Some(weights) if weights.len() != values.len() => {
                return Err(PlotError::WeightMismatch {
                    values: values.len(),
                    weights: weights.len(),
                });
            }
            _ => {}
        }
        if let Some(&value) = values.iter().find(|v| !v.is_finite()) {
            return Err(PlotError::NonFinite(value));
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        let (lo, hi, num_bins) = match bins {
            Bins::Count(0) => return Err(PlotError::ZeroBins),
            Bins::Count(k) if min == max => (min - 0.5, max + 0.5, k),
            Bins::Count(k) => (min, max, k),
            Bins::UnitWidth => {
                let (lo, hi) = (min.round() - 0.5, max.round() + 0.5);
                (lo, hi, (hi - lo).round() as usize)
            }
        };

        let width = (hi - lo) / num_bins as f64;
        let mut edges: Vec<f64> = (0..num_bins).map(|i| lo + width * i as f64).collect();
        edges.push(hi);

        let mut counts = vec![0.0; num_bins];
        for (i, &value) in values.iter().enumerate() {
            let bin = (((value - lo) / width).floor() as usize).min(num_bins - 1);
            counts[bin] += weights.map_or(1.0, |w| w[i]);
        }

        Ok(Self { edges, counts })
    }

    /// Returns the `len() + 1` bin edges in ascending order.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    #[must_use]
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always `false`, since a histogram has at least one bin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Returns the left edge, right edge, and count of every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }

    /// Returns the range covered by the bins.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }
}
