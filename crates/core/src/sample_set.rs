use std::collections::HashMap;

/// One row of a [`SampleSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Spin values aligned with [`SampleSet::variables`].
    pub sample: Vec<i8>,

    pub energy: f64,

    /// How many reads produced this sample.
    pub num_occurrences: usize,

    /// Fraction of chains that disagreed internally, or `0.0` when the
    /// sample was not unembedded from chains.
    pub chain_break_fraction: f64,
}

/// A set of samples with energies and occurrence counts.
///
/// Variables are kept sorted ascending so that samples can be evaluated
/// directly with [`Bqm::energy`](crate::Bqm::energy).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    variables: Vec<usize>,
    records: Vec<Record>,
}

impl SampleSet {
    /// Creates a sample set from precomputed records.
    ///
    /// # Panics
    ///
    /// Panics if `variables` is not strictly ascending or a record's sample
    /// length differs from the number of variables.
    #[must_use]
    pub fn new(variables: Vec<usize>, records: Vec<Record>) -> Self {
        assert!(
            variables.windows(2).all(|w| w[0] < w[1]),
            "sample set variables must be strictly ascending"
        );
        assert!(
            records.iter().all(|r| r.sample.len() == variables.len()),
            "every sample must assign every variable"
        );
        Self { variables, records }
    }

    /// Aggregates raw reads into one record per distinct sample.
    ///
    /// `energy` is evaluated once per distinct sample. Records keep the order
    /// in which each sample was first seen.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `energy`.
    pub fn from_samples<E, F>(
        variables: Vec<usize>,
        samples: impl IntoIterator<Item = Vec<i8>>,
        mut energy: F,
    ) -> Result<Self, E>
    where
        F: FnMut(&[usize], &[i8]) -> Result<f64, E>,
    {
        let mut index: HashMap<Vec<i8>, usize> = HashMap::new();
        let mut records: Vec<Record> = Vec::new();

        for sample in samples {
            if let Some(&i) = index.get(&sample) {
                records[i].num_occurrences += 1;
                continue;
            }
            let energy = energy(&variables, &sample)?;
            index.insert(sample.clone(), records.len());
            records.push(Record {
                sample,
                energy,
                num_occurrences: 1,
                chain_break_fraction: 0.0,
            });
        }

        Ok(Self::new(variables, records))
    }

    #[must_use]
    pub fn variables(&self) -> &[usize] {
        &self.variables
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn sample(&self, row: usize) -> Option<&[i8]> {
        self.records.get(row).map(|r| r.sample.as_slice())
    }

    /// Returns the energy of every record in row order.
    #[must_use]
    pub fn energies(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.energy).collect()
    }

    /// Returns the occurrence count of every record in row order.
    #[must_use]
    pub fn num_occurrences(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.num_occurrences).collect()
    }

    /// Returns the total number of reads represented by this set.
    #[must_use]
    pub fn total_reads(&self) -> usize {
        self.records.iter().map(|r| r.num_occurrences).sum()
    }

    /// Returns the record with the lowest energy.
    #[must_use]
    pub fn lowest(&self) -> Option<&Record> {
        self.records
            .iter()
            .min_by(|a, b| a.energy.total_cmp(&b.energy))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applies `f` to every record's energy.
    pub fn map_energies(&mut self, f: impl Fn(f64) -> f64) {
        for record in &mut self.records {
            record.energy = f(record.energy);
        }
    }
}
