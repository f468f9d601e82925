use nae3sat_core::Graph;

use crate::generators::nae3sat::random_nae3sat;

use super::{
    Action, Config, ConfigError, Error, Event, Phase, Status, find_embedding,
    find_embedding_unobserved,
};

/// A `width x height` grid where each node touches its eight surrounding
/// nodes (a king's graph).
fn king_graph(width: usize, height: usize) -> Graph {
    let index = |x: usize, y: usize| y * width + x;
    let mut graph = Graph::new(width * height);
    for y in 0..height {
        for x in 0..width {
            for (dx, dy) in [(1, 0), (0, 1), (1, 1)] {
                if x + dx < width && y + dy < height {
                    graph.add_edge(index(x, y), index(x + dx, y + dy)).unwrap();
                }
            }
            if x > 0 && y + 1 < height {
                graph.add_edge(index(x, y), index(x - 1, y + 1)).unwrap();
            }
        }
    }
    graph
}

fn complete_graph(n: usize) -> Graph {
    Graph::from_edges(n, (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v)))).unwrap()
}

#[test]
fn embeds_complete_graph_with_chains() {
    // K6 needs chains in a king's graph, whose cliques have at most 4 nodes.
    let source = complete_graph(6);
    let target = king_graph(8, 8);

    let solution = find_embedding_unobserved(&source, &target, &Config::default())
        .expect("K6 fits in an 8x8 king's graph");

    assert_eq!(solution.embedding.len(), 6);
    assert_eq!(solution.embedding.verify(&source, &target), Ok(()));
    assert!(solution.embedding.num_qubits() > 6);
    assert_ne!(solution.status, Status::StoppedByObserver);
}

#[test]
fn embeds_random_nae3sat_problem() {
    let bqm = random_nae3sat(16, 24, 42, false).unwrap();
    let source = bqm.to_graph().unwrap();
    let target = king_graph(16, 16);

    let solution = find_embedding_unobserved(&source, &target, &Config::default())
        .expect("a small NAE3SAT problem fits in a 16x16 king's graph");

    assert_eq!(solution.embedding.verify(&source, &target), Ok(()));
    assert!(solution.embedding.chain_lengths().iter().all(|&len| len >= 1));
}

#[test]
fn isolated_nodes_get_single_qubits() {
    let source = Graph::new(3);
    let target = king_graph(3, 3);

    let solution = find_embedding_unobserved(&source, &target, &Config::default()).unwrap();

    assert_eq!(solution.embedding.chain_lengths(), vec![1, 1, 1]);
    assert_eq!(solution.embedding.verify(&source, &target), Ok(()));
}

#[test]
fn same_seed_reproduces_embedding() {
    let source = complete_graph(5);
    let target = king_graph(6, 6);
    let config = Config::default().with_seed(9);

    let first = find_embedding_unobserved(&source, &target, &config).unwrap();
    let second = find_embedding_unobserved(&source, &target, &config).unwrap();

    assert_eq!(first.embedding, second.embedding);
}

#[test]
fn empty_source_needs_no_search() {
    let solution =
        find_embedding_unobserved(&Graph::new(0), &king_graph(2, 2), &Config::default()).unwrap();

    assert!(solution.embedding.is_empty());
    assert_eq!(solution.rounds, 0);
}

#[test]
fn rejects_target_smaller_than_source() {
    let result = find_embedding_unobserved(&complete_graph(5), &king_graph(2, 2), &Config::default());

    assert!(matches!(
        result,
        Err(Error::TargetTooSmall {
            source_nodes: 5,
            target_nodes: 4
        })
    ));
}

#[test]
fn fails_when_no_minor_exists() {
    // A path cannot host a triangle however long its chains are.
    let source = complete_graph(3);
    let target = Graph::from_edges(6, (1..6).map(|i| (i - 1, i))).unwrap();
    let config = Config::new(2, 8, 1, 2.0, 1.6).unwrap();

    let result = find_embedding_unobserved(&source, &target, &config);

    assert!(matches!(result, Err(Error::NotFound { tries: 2 })));
}

#[test]
fn abandons_attempt_once_overlap_stalls() {
    // A path has no triangle minor, so overlap never reaches zero. Without
    // patience the attempt would run all 500 rounds.
    let source = complete_graph(3);
    let target = Graph::from_edges(6, (1..6).map(|i| (i - 1, i))).unwrap();
    let config = Config::new(1, 500, 1, 2.0, 1.6)
        .unwrap()
        .with_overlap_patience(2);

    let mut events: Vec<Event> = Vec::new();
    let observer = |event: &Event| {
        events.push(*event);
        None
    };

    let result = find_embedding(&source, &target, &config, observer);

    assert!(matches!(result, Err(Error::NotFound { tries: 1 })));
    assert!(events.len() < 20, "ran {} rounds", events.len());
    assert!(events.iter().all(|e| e.phase == Phase::Overlap && e.overlapping_qubits > 0));
}

#[test]
fn emits_refine_events_after_overlap_is_resolved() {
    let source = complete_graph(4);
    let target = king_graph(6, 6);

    let mut events: Vec<Event> = Vec::new();
    let observer = |event: &Event| {
        events.push(*event);
        None
    };

    let solution = find_embedding(&source, &target, &Config::default(), observer).unwrap();

    let first_refine = events
        .iter()
        .position(|e| e.phase == Phase::Refine)
        .expect("refinement runs after overlap is gone");
    assert!(events[..first_refine].iter().all(|e| e.phase == Phase::Overlap));
    assert_eq!(events[first_refine - 1].overlapping_qubits, 0);
    assert!(events[first_refine..].iter().all(|e| e.overlapping_qubits == 0));
    assert_eq!(solution.rounds, events.last().unwrap().round);
}

#[test]
fn observer_can_stop_early() {
    let source = complete_graph(5);
    let target = king_graph(6, 6);

    let mut count = 0;
    let observer = |_: &Event| {
        count += 1;
        Some(Action::StopEarly)
    };

    let result = find_embedding(&source, &target, &Config::default(), observer);

    assert_eq!(count, 1);
    match result {
        Ok(solution) => {
            assert_eq!(solution.status, Status::StoppedByObserver);
            assert_eq!(solution.embedding.verify(&source, &target), Ok(()));
        }
        Err(error) => assert!(matches!(error, Error::Stopped)),
    }
}

#[test]
fn validates_config() {
    assert_eq!(Config::new(0, 1, 1, 2.0, 2.0), Err(ConfigError::Tries));
    assert_eq!(Config::new(1, 0, 1, 2.0, 2.0), Err(ConfigError::Rounds));
    assert_eq!(Config::new(1, 1, 1, 1.0, 2.0), Err(ConfigError::Penalty));
    assert_eq!(Config::new(1, 1, 1, 2.0, f64::NAN), Err(ConfigError::Growth));
    assert_eq!(Config::default().with_seed(3).seed(), 3);
    assert_eq!(Config::default().overlap_patience(), 12);
    assert_eq!(Config::default().with_overlap_patience(4).overlap_patience(), 4);
}
