use approx::assert_relative_eq;
use nae3sat_core::{Bqm, SampleParams, Sampler, Topology, TopologyKind};
use nae3sat_solvers::sampling::annealing;

use super::{ConfigError, QpuConfig, QpuError, SimulatedQpu, Term};

/// A small Pegasus solver with a short, seeded anneal.
fn small_qpu(seed: u64) -> SimulatedQpu {
    let annealing = annealing::Config::new(200, [0.1, 5.0]).unwrap();
    let config = QpuConfig::new(0.015, annealing).unwrap().with_seed(seed);
    let topology = Topology {
        kind: TopologyKind::Pegasus,
        shape: vec![2],
    };
    SimulatedQpu::new("test_sim", topology, config).unwrap()
}

fn params(num_reads: usize, auto_scale: bool) -> SampleParams {
    SampleParams {
        num_reads,
        auto_scale,
        label: Some("qpu test".into()),
    }
}

/// A ferromagnetic model over the first few couplers of `qpu`.
fn ferromagnet(qpu: &SimulatedQpu, couplers: usize) -> Bqm {
    let mut bqm = Bqm::new();
    for (p, q) in qpu.graph().edges().take(couplers) {
        bqm.add_quadratic(p, q, -1.0).unwrap();
    }
    bqm
}

#[test]
fn publishes_properties() {
    let qpu = small_qpu(0);

    assert_eq!(qpu.name(), "test_sim");
    let properties = qpu.properties();
    assert_eq!(properties.h_range, [-4.0, 4.0]);
    assert_eq!(properties.j_range, [-1.0, 1.0]);
    assert_eq!(properties.extended_j_range, [-2.0, 1.0]);
    assert_eq!(properties.num_qubits, qpu.graph().num_nodes());
    assert_eq!(properties.topology.kind, TopologyKind::Pegasus);
}

#[test]
fn anneals_to_ground_state() {
    let qpu = small_qpu(1);
    let bqm = ferromagnet(&qpu, 10);

    let set = qpu.sample(&bqm, &params(20, false)).unwrap();

    assert_eq!(set.total_reads(), 20);
    assert_eq!(set.variables(), bqm.variables().collect::<Vec<_>>());
    assert_relative_eq!(set.lowest().unwrap().energy, -10.0);
}

#[test]
fn energies_use_the_submitted_model() {
    let qpu = small_qpu(2);
    let bqm = ferromagnet(&qpu, 6);

    let set = qpu.sample(&bqm, &params(10, false)).unwrap();

    for record in set.records() {
        let expected = bqm.energy(set.variables(), &record.sample).unwrap();
        assert_relative_eq!(record.energy, expected);
    }
}

#[test]
fn seeded_solver_is_reproducible() {
    let bqm = ferromagnet(&small_qpu(0), 8);

    let first = small_qpu(5).sample(&bqm, &params(5, false)).unwrap();
    let second = small_qpu(5).sample(&bqm, &params(5, false)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn rejects_invalid_submissions() {
    let qpu = small_qpu(0);
    let num_qubits = qpu.properties().num_qubits;

    let bqm = ferromagnet(&qpu, 1);
    assert_eq!(qpu.sample(&bqm, &params(0, false)), Err(QpuError::InvalidReads));

    let mut outside = Bqm::new();
    outside.add_linear(num_qubits, 1.0);
    assert_eq!(
        qpu.sample(&outside, &params(1, false)),
        Err(QpuError::InvalidQubit {
            qubit: num_qubits,
            num_qubits
        })
    );

    let (p, q) = (0..num_qubits)
        .flat_map(|q| (q + 1..num_qubits).map(move |r| (q, r)))
        .find(|&(p, q)| !qpu.graph().has_edge(p, q))
        .unwrap();
    let mut uncoupled = Bqm::new();
    uncoupled.add_quadratic(p, q, 0.5).unwrap();
    assert_eq!(
        qpu.sample(&uncoupled, &params(1, false)),
        Err(QpuError::MissingCoupler(p, q))
    );
}

#[test]
fn enforces_ranges_unless_auto_scaling() {
    let qpu = small_qpu(3);
    let (p, q) = qpu.graph().edges().next().unwrap();
    let mut strong = Bqm::new();
    strong.add_quadratic(p, q, -3.0).unwrap();

    assert_eq!(
        qpu.sample(&strong, &params(1, false)),
        Err(QpuError::BiasOutOfRange {
            term: Term::Quadratic(p, q),
            bias: -3.0,
            range: [-2.0, 1.0],
        })
    );

    let set = qpu.sample(&strong, &params(4, true)).unwrap();
    assert_relative_eq!(set.lowest().unwrap().energy, -3.0);

    // The extended range admits couplings below the standard range.
    strong.add_quadratic(p, q, 1.0).unwrap();
    assert!(qpu.sample(&strong, &params(1, false)).is_ok());
}

#[test]
fn validates_config() {
    let annealing = annealing::Config::default();

    assert!(matches!(
        QpuConfig::new(-0.1, annealing),
        Err(ConfigError::IceSigma(sigma)) if sigma == -0.1
    ));
    assert!(QpuConfig::new(f64::INFINITY, annealing).is_err());
    assert_relative_eq!(QpuConfig::default().ice_sigma(), 0.015);
    assert_relative_eq!(QpuConfig::new(0.0, annealing).unwrap().ice_sigma(), 0.0);
}
