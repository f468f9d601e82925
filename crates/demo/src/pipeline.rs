//! The problem sweep.
//!
//! # Steps
//!
//! For each ratio `rho` in [`SweepConfig::ratios`]:
//!
//! 1. Generate a problem with `round(num_variables * rho)` clauses.
//! 2. For each backend, in order:
//!    - find a minor embedding of the problem graph into the backend graph,
//!      add its chain-length histogram to the ratio's chain-length figure, and
//!      save it;
//!    - sample through a [`FixedEmbeddingComposite`] over a
//!      [`ScaleComposite`] that maps biases into the backend's `h_range` and
//!      `extended_j_range`, then add the energy histogram to the ratio's
//!      energy figure and save it.
//!
//! Each backend adds a series to the same two figures, so the saved files
//! end up overlaying every backend.
//!
//! # Observer Events
//!
//! The sweep emits an [`Event`] before or after every step. Observers can
//! return [`Action::StopEarly`] to stop before the next step; the runs that
//! finished are returned with [`Status::StoppedByObserver`].
//!
//! Any service failure ends the sweep with a [`PipelineError`].

mod action;
mod config;
mod error;
mod event;
mod summary;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{ConfigError, SweepConfig};
pub use error::PipelineError;
pub use event::Event;
pub use summary::{Run, Status, Summary};

use std::path::{Path, PathBuf};

use nae3sat_core::{
    Bqm, Embedder, Graph, Observer, ProblemGenerator, ProblemSpec, SampleParams, SampleSet,
    Sampler,
};
use nae3sat_plot::{Bins, FigureConfig, FigureKey, Figures, Histogram};
use nae3sat_solvers::sampling::{
    EmbeddedParams, FixedEmbeddingComposite, ScaleComposite, ScaleRanges,
};
use tracing::debug;

/// Bins used for every energy histogram.
const ENERGY_BINS: usize = 10;

/// Returns the number of clauses for `num_variables` variables at ratio `rho`.
///
/// Halfway cases round to the nearest even count.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clause_count(num_variables: usize, rho: f64) -> usize {
    (num_variables as f64 * rho).round_ties_even().max(0.0) as usize
}

/// Runs the sweep described by `config`.
///
/// Plots are written under `output_root.join(config.plot_dir())`, which is
/// created if missing. See the [module docs](self) for the steps and
/// observer actions.
///
/// # Errors
///
/// Returns an error if the plot directory cannot be created, or if any
/// generation, embedding, sampling, or plotting step fails.
pub fn run<G, E, S, Obs>(
    config: &SweepConfig,
    generator: &G,
    embedder: &E,
    backends: &[S],
    output_root: &Path,
    mut observer: Obs,
) -> Result<Summary, PipelineError>
where
    G: ProblemGenerator,
    E: Embedder,
    S: Sampler,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let plot_dir = output_root.join(config.plot_dir());
    std::fs::create_dir_all(&plot_dir).map_err(|source| PipelineError::PlotDir {
        path: plot_dir.clone(),
        source,
    })?;

    let mut sweep = Sweep {
        config,
        plot_dir,
        figures: Figures::new(),
        runs: Vec::new(),
    };

    for &rho in config.ratios() {
        let num_clauses = clause_count(config.num_variables(), rho);
        let event = Event::ProblemCreated {
            rho,
            num_variables: config.num_variables(),
            num_clauses,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(sweep.finish(Status::StoppedByObserver));
        }

        let spec = ProblemSpec {
            num_variables: config.num_variables(),
            num_clauses,
            seed: config.seed(),
        };
        let bqm = generator
            .generate(&spec)
            .map_err(|err| PipelineError::generate(rho, err))?;
        let source = bqm.to_graph()?;

        for backend in backends {
            let problem = Problem {
                rho,
                num_clauses,
                bqm: &bqm,
                source: &source,
            };
            let action = sweep.run_backend(&problem, embedder, backend, &mut observer)?;
            if let Some(Action::StopEarly) = action {
                return Ok(sweep.finish(Status::StoppedByObserver));
            }
        }
    }

    observer.observe(&Event::Finished {
        plot_dir: &sweep.plot_dir,
    });
    Ok(sweep.finish(Status::Completed))
}

/// One generated problem, shared by every backend.
struct Problem<'a> {
    rho: f64,
    num_clauses: usize,
    bqm: &'a Bqm,
    source: &'a Graph,
}

/// State carried across the steps of a sweep.
struct Sweep<'c> {
    config: &'c SweepConfig,
    plot_dir: PathBuf,
    figures: Figures,
    runs: Vec<Run>,
}

impl Sweep<'_> {
    /// Embeds and samples `problem` on one backend, recording a [`Run`].
    ///
    /// Returns the observer's action if it asked to stop.
    fn run_backend<E, S, Obs>(
        &mut self,
        problem: &Problem<'_>,
        embedder: &E,
        backend: &S,
        observer: &mut Obs,
    ) -> Result<Option<Action>, PipelineError>
    where
        E: Embedder,
        S: Sampler,
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        let name = backend.name();

        if let Some(action) = observer.observe(&Event::EmbeddingStarted { backend: name }) {
            return Ok(Some(action));
        }
        let embedding = embedder
            .find_embedding(problem.source, backend.graph())
            .map_err(|err| PipelineError::embed(name, err))?;
        let chain_lengths = embedding.chain_lengths();
        let chain_length_plot = self.plot_chain_lengths(problem.rho, name, &chain_lengths)?;
        let event = Event::Embedded {
            backend: name,
            chain_lengths: &chain_lengths,
        };
        if let Some(action) = observer.observe(&event) {
            return Ok(Some(action));
        }

        if let Some(action) = observer.observe(&Event::SendingProblem { backend: name }) {
            return Ok(Some(action));
        }
        let params = EmbeddedParams {
            chain_strength: self.config.chain_strength(),
            sample: SampleParams {
                num_reads: self.config.num_reads(),
                auto_scale: self.config.auto_scale(),
                label: Some(self.config.label().to_owned()),
            },
        };
        let scaled = ScaleComposite::new(backend, ScaleRanges::extended(backend.properties()));
        let sampleset = FixedEmbeddingComposite::new(scaled, &embedding)
            .sample(problem.bqm, &params)
            .map_err(|err| PipelineError::sample(name, err))?;
        let energy_plot = self.plot_energies(problem.rho, name, &sampleset)?;

        self.runs.push(Run {
            rho: problem.rho,
            num_clauses: problem.num_clauses,
            backend: name.to_owned(),
            chain_lengths,
            lowest_energy: sampleset.lowest().map(|record| record.energy),
            total_reads: sampleset.total_reads(),
            chain_length_plot,
            energy_plot,
        });

        let event = Event::Sampled {
            backend: name,
            sampleset: &sampleset,
        };
        Ok(observer.observe(&event))
    }

    fn plot_chain_lengths(
        &mut self,
        rho: f64,
        backend: &str,
        chain_lengths: &[usize],
    ) -> Result<PathBuf, PipelineError> {
        #[allow(clippy::cast_precision_loss)]
        let values: Vec<f64> = chain_lengths.iter().map(|&len| len as f64).collect();
        let histogram = Histogram::new(&values, None, Bins::UnitWidth)?;
        let config = self.figure_config(rho, "Embedding Chain Length");
        self.add_and_save(FigureKey::chain_length(rho), config, backend, histogram)
    }

    fn plot_energies(
        &mut self,
        rho: f64,
        backend: &str,
        sampleset: &SampleSet,
    ) -> Result<PathBuf, PipelineError> {
        #[allow(clippy::cast_precision_loss)]
        let weights: Vec<f64> = sampleset
            .num_occurrences()
            .into_iter()
            .map(|count| count as f64)
            .collect();
        let histogram = Histogram::new(
            &sampleset.energies(),
            Some(weights.as_slice()),
            Bins::Count(ENERGY_BINS),
        )?;
        let config = self.figure_config(rho, "Energy");
        self.add_and_save(FigureKey::energies(rho), config, backend, histogram)
    }

    fn figure_config(&self, rho: f64, x_label: &str) -> FigureConfig {
        FigureConfig::new()
            .title(format!("rho={rho:?}, N={}", self.config.num_variables()))
            .x_label(x_label)
            .y_label("Count")
            .legend()
    }

    /// Adds a series to the figure for `key` and rewrites its file.
    ///
    /// `config` is used only if the figure does not exist yet.
    fn add_and_save(
        &mut self,
        key: FigureKey,
        config: FigureConfig,
        backend: &str,
        histogram: Histogram,
    ) -> Result<PathBuf, PipelineError> {
        let figure = self.figures.figure(key, || config);
        figure.add_series(backend, histogram);

        let path = self.plot_dir.join(key.file_name());
        figure.save(&path)?;
        debug!(path = %path.display(), series = figure.num_series(), "plot saved");
        Ok(path)
    }

    fn finish(self, status: Status) -> Summary {
        Summary {
            status,
            runs: self.runs,
            plot_dir: self.plot_dir,
        }
    }
}
