use std::{cell::RefCell, fmt};

use approx::assert_relative_eq;
use nae3sat_core::{
    Bqm, Embedder, Embedding, Graph, ProblemGenerator, ProblemSpec, SampleParams, SampleSet,
    Sampler, SolverProperties, Topology, TopologyKind,
};
use nae3sat_solvers::generators::Nae3sat;
use tempfile::TempDir;

use super::*;

#[derive(Debug)]
struct Outage;

impl fmt::Display for Outage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("backend unavailable")
    }
}

impl std::error::Error for Outage {}

/// Wraps the planted generator and records every spec it is given.
#[derive(Default)]
struct Recording {
    specs: RefCell<Vec<ProblemSpec>>,
}

impl ProblemGenerator for Recording {
    type Error = <Nae3sat as ProblemGenerator>::Error;

    fn generate(&self, spec: &ProblemSpec) -> Result<Bqm, Self::Error> {
        self.specs.borrow_mut().push(*spec);
        Nae3sat::new().planted().generate(spec)
    }
}

/// Maps every source node onto the target node with the same index.
struct Identity;

impl Embedder for Identity {
    type Error = Outage;

    fn find_embedding(&self, source: &Graph, target: &Graph) -> Result<Embedding, Outage> {
        if source.num_nodes() > target.num_nodes() {
            return Err(Outage);
        }
        Ok((0..source.num_nodes()).map(|v| (v, vec![v])).collect())
    }
}

/// A fully connected backend that answers every read with all spins up.
struct AllUp {
    name: &'static str,
    graph: Graph,
    properties: SolverProperties,
    offline: bool,
}

impl AllUp {
    fn new(name: &'static str, num_qubits: usize) -> Self {
        let edges = (0..num_qubits).flat_map(|u| (u + 1..num_qubits).map(move |v| (u, v)));
        Self {
            name,
            graph: Graph::from_edges(num_qubits, edges).unwrap(),
            properties: SolverProperties {
                h_range: [-4.0, 4.0],
                j_range: [-1.0, 1.0],
                extended_j_range: [-2.0, 1.0],
                num_qubits,
                topology: Topology {
                    kind: TopologyKind::Zephyr,
                    shape: vec![1, 1],
                },
            },
            offline: false,
        }
    }

    fn offline(mut self) -> Self {
        self.offline = true;
        self
    }
}

impl Sampler for AllUp {
    type Error = Outage;

    fn name(&self) -> &str {
        self.name
    }

    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn properties(&self) -> &SolverProperties {
        &self.properties
    }

    fn sample(&self, bqm: &Bqm, params: &SampleParams) -> Result<SampleSet, Outage> {
        if self.offline {
            return Err(Outage);
        }
        assert!(!params.auto_scale);
        let variables: Vec<usize> = bqm.variables().collect();
        let reads = vec![vec![1_i8; variables.len()]; params.num_reads];
        Ok(SampleSet::from_samples(variables, reads, |vars, s| bqm.energy(vars, s)).unwrap())
    }
}

/// Records a short name for every event and stops on the `stop_at`-th one.
struct Trace<'t> {
    seen: &'t mut Vec<String>,
    stop_at: Option<usize>,
}

impl<'t> Trace<'t> {
    fn new(seen: &'t mut Vec<String>) -> Self {
        Self {
            seen,
            stop_at: None,
        }
    }

    fn stop_at(mut self, count: usize) -> Self {
        self.stop_at = Some(count);
        self
    }
}

impl Observer<Event<'_>, Action> for Trace<'_> {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        let name = match event {
            Event::ProblemCreated { rho, .. } => format!("problem {rho:?}"),
            Event::EmbeddingStarted { backend } => format!("embedding {backend}"),
            Event::Embedded { backend, .. } => format!("embedded {backend}"),
            Event::SendingProblem { backend } => format!("sending {backend}"),
            Event::Sampled { backend, .. } => format!("sampled {backend}"),
            Event::Finished { .. } => "finished".to_owned(),
        };
        self.seen.push(name);
        (self.stop_at == Some(self.seen.len())).then_some(Action::StopEarly)
    }
}

fn small_sweep() -> SweepConfig {
    SweepConfig::new(6, vec![2.1, 3.0]).unwrap().with_num_reads(5).unwrap()
}

fn backends() -> [AllUp; 2] {
    [AllUp::new("alpha", 8), AllUp::new("beta", 6)]
}

#[test]
fn clause_counts_round_half_to_even() {
    assert_eq!(clause_count(75, 2.1), 158);
    assert_eq!(clause_count(75, 3.0), 225);
    assert_eq!(clause_count(4, 0.625), 2);
    assert_eq!(clause_count(4, 0.875), 4);
    assert_eq!(clause_count(6, 2.1), 13);
}

#[test]
fn writes_one_figure_per_ratio_and_plot_type() {
    let dir = TempDir::new().unwrap();
    let generator = Recording::default();

    let summary = run(&small_sweep(), &generator, &Identity, &backends(), dir.path(), ()).unwrap();

    assert_eq!(summary.status, Status::Completed);
    assert_eq!(summary.plot_dir, dir.path().join("plots"));

    let specs = generator.specs.borrow();
    let clauses: Vec<usize> = specs.iter().map(|spec| spec.num_clauses).collect();
    assert_eq!(clauses, vec![13, 18]);
    assert!(specs.iter().all(|spec| spec.num_variables == 6 && spec.seed == 42));

    let order: Vec<(f64, &str)> = summary
        .runs
        .iter()
        .map(|run| (run.rho, run.backend.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![(2.1, "alpha"), (2.1, "beta"), (3.0, "alpha"), (3.0, "beta")]
    );

    for run in &summary.runs {
        assert_eq!(run.chain_lengths, vec![1; 6]);
        assert_eq!(run.total_reads, 5);
        #[allow(clippy::cast_precision_loss)]
        let ground = -(run.num_clauses as f64);
        assert_relative_eq!(run.lowest_energy.unwrap(), ground, epsilon = 1e-9);
    }

    let names: Vec<String> = summary
        .plot_files()
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "rho_210_chain_length.png",
            "rho_210_energies.png",
            "rho_300_chain_length.png",
            "rho_300_energies.png",
        ]
    );
    for path in summary.plot_files() {
        let len = std::fs::metadata(path).unwrap().len();
        assert!(len > 0, "{} is empty", path.display());
    }
}

#[test]
fn emits_events_in_step_order() {
    let dir = TempDir::new().unwrap();
    let config = SweepConfig::new(6, vec![2.1]).unwrap().with_num_reads(2).unwrap();
    let mut seen = Vec::new();

    let observer = Trace::new(&mut seen);

    run(&config, &Nae3sat::new(), &Identity, &backends(), dir.path(), observer).unwrap();

    assert_eq!(
        seen,
        vec![
            "problem 2.1",
            "embedding alpha",
            "embedded alpha",
            "sending alpha",
            "sampled alpha",
            "embedding beta",
            "embedded beta",
            "sending beta",
            "sampled beta",
            "finished",
        ]
    );
}

#[test]
fn observer_can_stop_between_backends() {
    let dir = TempDir::new().unwrap();
    let mut seen = Vec::new();

    let summary = run(
        &small_sweep(),
        &Nae3sat::new(),
        &Identity,
        &backends(),
        dir.path(),
        Trace::new(&mut seen).stop_at(5),
    )
    .unwrap();

    assert_eq!(summary.status, Status::StoppedByObserver);
    assert_eq!(seen.last().map(String::as_str), Some("sampled alpha"));
    assert_eq!(summary.runs.len(), 1);
    assert_eq!(summary.plot_files().len(), 2);
}

#[test]
fn observer_can_stop_before_the_first_problem() {
    let dir = TempDir::new().unwrap();
    let generator = Recording::default();
    let mut seen = Vec::new();
    let observer = Trace::new(&mut seen).stop_at(1);

    let summary = run(&small_sweep(), &generator, &Identity, &backends(), dir.path(), observer)
        .unwrap();

    assert_eq!(seen, vec!["problem 2.1"]);
    assert_eq!(summary.status, Status::StoppedByObserver);
    assert!(summary.runs.is_empty());
    assert!(generator.specs.borrow().is_empty());
}

#[test]
fn reports_generation_failures_with_the_ratio() {
    let dir = TempDir::new().unwrap();
    let config = SweepConfig::new(2, vec![1.5]).unwrap();

    let err = run(&config, &Nae3sat::new(), &Identity, &backends(), dir.path(), ()).unwrap_err();

    assert!(matches!(err, PipelineError::Generate { rho, .. } if rho == 1.5));
}

#[test]
fn reports_embedding_failures_with_the_backend() {
    let dir = TempDir::new().unwrap();
    let backends = [AllUp::new("alpha", 8), AllUp::new("tiny", 4)];

    let err =
        run(&small_sweep(), &Nae3sat::new(), &Identity, &backends, dir.path(), ()).unwrap_err();

    assert!(matches!(err, PipelineError::Embed { ref backend, .. } if backend == "tiny"));
    assert_eq!(err.to_string(), "failed to embed problem into tiny");
}

#[test]
fn reports_sampling_failures_with_the_backend() {
    let dir = TempDir::new().unwrap();
    let backends = [AllUp::new("alpha", 8), AllUp::new("beta", 8).offline()];

    let err =
        run(&small_sweep(), &Nae3sat::new(), &Identity, &backends, dir.path(), ()).unwrap_err();

    assert!(matches!(err, PipelineError::Sample { ref backend, .. } if backend == "beta"));
}

#[test]
fn places_plots_under_the_configured_directory() {
    let dir = TempDir::new().unwrap();
    let config = SweepConfig::new(6, vec![3.0])
        .unwrap()
        .with_num_reads(1)
        .unwrap()
        .with_plot_dir("out/figures");

    let summary = run(&config, &Nae3sat::new(), &Identity, &backends(), dir.path(), ()).unwrap();

    assert!(dir.path().join("out/figures/rho_300_energies.png").is_file());
    let plot_dir = dir.path().join("out/figures");
    assert!(summary.plot_files().iter().all(|path| path.starts_with(&plot_dir)));
}
