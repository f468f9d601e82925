use nae3sat_core::{Bqm, Graph, SampleParams, SampleSet, Sampler, SolverProperties};

/// Target ranges a [`ScaleComposite`] normalizes biases into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRanges {
    /// Range for linear biases.
    pub bias: [f64; 2],

    /// Range for interaction biases.
    pub quadratic: [f64; 2],
}

impl ScaleRanges {
    /// Uses the backend's linear range and its extended coupling range.
    #[must_use]
    pub fn extended(properties: &SolverProperties) -> Self {
        Self {
            bias: properties.h_range,
            quadratic: properties.extended_j_range,
        }
    }

    /// Uses the backend's linear range and its standard coupling range.
    #[must_use]
    pub fn standard(properties: &SolverProperties) -> Self {
        Self {
            bias: properties.h_range,
            quadratic: properties.j_range,
        }
    }
}

/// Returns the factor a model must be divided by to fit within `ranges`.
///
/// The result is the largest ratio of a bias extremum to the matching range
/// endpoint. Endpoints of zero impose no constraint. A model that already
/// fits yields a value of at most one, and an empty model yields zero.
#[must_use]
pub fn normalization_scalar(bqm: &Bqm, ranges: &ScaleRanges) -> f64 {
    let Some(extrema) = bqm.bias_extrema() else {
        return 0.0;
    };
    let ratio = |value: f64, bound: f64| if bound == 0.0 { 0.0 } else { value / bound };

    [
        ratio(extrema.linear[0], ranges.bias[0]),
        ratio(extrema.linear[1], ranges.bias[1]),
        ratio(extrema.quadratic[0], ranges.quadratic[0]),
        ratio(extrema.quadratic[1], ranges.quadratic[1]),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// A sampler that rescales models into fixed ranges before delegating.
///
/// The model is divided by [`normalization_scalar`] when it is positive, so
/// its extreme biases land on the range endpoints. Returned energies are
/// multiplied back, so they are reported on the caller's scale.
#[derive(Debug, Clone)]
pub struct ScaleComposite<S> {
    child: S,
    ranges: ScaleRanges,
}

impl<S: Sampler> ScaleComposite<S> {
    pub fn new(child: S, ranges: ScaleRanges) -> Self {
        Self { child, ranges }
    }
}

impl<S: Sampler> Sampler for ScaleComposite<S> {
    type Error = S::Error;

    fn name(&self) -> &str {
        self.child.name()
    }

    fn graph(&self) -> &Graph {
        self.child.graph()
    }

    fn properties(&self) -> &SolverProperties {
        self.child.properties()
    }

    fn sample(&self, bqm: &Bqm, params: &SampleParams) -> Result<SampleSet, Self::Error> {
        let inv_scalar = normalization_scalar(bqm, &self.ranges);
        if inv_scalar <= 0.0 {
            return self.child.sample(bqm, params);
        }

        let mut scaled = bqm.clone();
        scaled.scale(1.0 / inv_scalar);
        let mut sampleset = self.child.sample(&scaled, params)?;
        sampleset.map_energies(|energy| energy * inv_scalar);
        Ok(sampleset)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, convert::Infallible};

    use approx::assert_relative_eq;
    use nae3sat_core::{Topology, TopologyKind};

    use super::*;

    fn properties() -> SolverProperties {
        SolverProperties {
            h_range: [-4.0, 4.0],
            j_range: [-1.0, 1.0],
            extended_j_range: [-2.0, 1.0],
            num_qubits: 2,
            topology: Topology {
                kind: TopologyKind::Pegasus,
                shape: vec![1],
            },
        }
    }

    /// Records the model it receives and returns the all-up state.
    struct Recorder {
        graph: Graph,
        properties: SolverProperties,
        seen: RefCell<Option<Bqm>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                graph: Graph::from_edges(2, [(0, 1)]).unwrap(),
                properties: properties(),
                seen: RefCell::new(None),
            }
        }
    }

    impl Sampler for Recorder {
        type Error = Infallible;

        fn name(&self) -> &str {
            "recorder"
        }

        fn graph(&self) -> &Graph {
            &self.graph
        }

        fn properties(&self) -> &SolverProperties {
            &self.properties
        }

        fn sample(&self, bqm: &Bqm, _: &SampleParams) -> Result<SampleSet, Infallible> {
            *self.seen.borrow_mut() = Some(bqm.clone());
            let variables: Vec<usize> = bqm.variables().collect();
            let up = vec![1; variables.len()];
            let energy = bqm.energy(&variables, &up).unwrap();
            SampleSet::from_samples(variables, [up], |_, _| Ok(energy))
        }
    }

    fn strong_pair() -> Bqm {
        let mut bqm = Bqm::with_variables(2);
        bqm.add_linear(0, 2.0);
        bqm.add_quadratic(0, 1, -6.0).unwrap();
        bqm
    }

    #[test]
    fn scalar_is_largest_endpoint_ratio() {
        let ranges = ScaleRanges::extended(&properties());

        // -6 / -2 dominates 2 / 4.
        assert_relative_eq!(normalization_scalar(&strong_pair(), &ranges), 3.0);
        assert_relative_eq!(normalization_scalar(&Bqm::new(), &ranges), 0.0);
    }

    #[test]
    fn zero_endpoints_impose_no_constraint() {
        let ranges = ScaleRanges {
            bias: [0.0, 1.0],
            quadratic: [-1.0, 0.0],
        };
        let mut bqm = Bqm::with_variables(2);
        bqm.add_linear(0, -5.0);
        bqm.add_quadratic(0, 1, 0.5).unwrap();

        assert_relative_eq!(normalization_scalar(&bqm, &ranges), 0.0);
    }

    #[test]
    fn scales_model_and_restores_energies() {
        let recorder = Recorder::new();
        let composite = ScaleComposite::new(&recorder, ScaleRanges::extended(&properties()));

        let set = composite.sample(&strong_pair(), &SampleParams::default()).unwrap();

        let seen = recorder.seen.borrow().clone().unwrap();
        assert_relative_eq!(seen.quadratic(0, 1).unwrap(), -2.0);
        assert_relative_eq!(seen.linear(0).unwrap(), 2.0 / 3.0);
        // All-up energy on the caller's scale: 2 - 6.
        assert_relative_eq!(set.records()[0].energy, -4.0);
        assert_eq!(composite.name(), "recorder");
    }

    #[test]
    fn standard_ranges_use_the_narrow_coupling_range() {
        let ranges = ScaleRanges::standard(&properties());

        assert_eq!(ranges.quadratic, [-1.0, 1.0]);
        assert_relative_eq!(normalization_scalar(&strong_pair(), &ranges), 6.0);
    }
}
