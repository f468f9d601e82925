use std::path::PathBuf;

/// Indicates how a sweep finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every ratio was run on every backend.
    Completed,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The outcome of one problem on one backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub rho: f64,
    pub num_clauses: usize,
    pub backend: String,

    /// Chain length of every problem variable, in variable order.
    pub chain_lengths: Vec<usize>,

    /// Lowest energy among the returned samples, if any were returned.
    pub lowest_energy: Option<f64>,

    pub total_reads: usize,
    pub chain_length_plot: PathBuf,
    pub energy_plot: PathBuf,
}

/// The result of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub status: Status,

    /// Completed runs in the order they finished.
    pub runs: Vec<Run>,

    pub plot_dir: PathBuf,
}

impl Summary {
    /// Returns every distinct plot file written, in the order first written.
    #[must_use]
    pub fn plot_files(&self) -> Vec<&PathBuf> {
        let mut files: Vec<&PathBuf> = Vec::new();
        for run in &self.runs {
            for path in [&run.chain_length_plot, &run.energy_plot] {
                if !files.contains(&path) {
                    files.push(path);
                }
            }
        }
        files
    }
}
