use nae3sat_core::Observer;
use tracing::{debug, info};

use crate::pipeline::{Action, Event};

/// Logs sweep progress with `tracing`.
///
/// Each step gets one `info` line; chain-length ranges and lowest energies
/// go to `debug`. Never stops the sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressLog;

impl Observer<Event<'_>, Action> for ProgressLog {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        if let Some(line) = headline(event) {
            info!("{line}");
        }

        match *event {
            Event::Embedded {
                backend,
                chain_lengths,
            } => {
                let min = chain_lengths.iter().min().copied().unwrap_or(0);
                let max = chain_lengths.iter().max().copied().unwrap_or(0);
                debug!(backend, min, max, chains = chain_lengths.len(), "chain lengths");
            }
            Event::Sampled { backend, sampleset } => {
                if let Some(lowest) = sampleset.lowest() {
                    debug!(
                        backend,
                        energy = lowest.energy,
                        occurrences = lowest.num_occurrences,
                        chain_break_fraction = lowest.chain_break_fraction,
                        "lowest energy"
                    );
                }
            }
            _ => {}
        }

        None
    }
}

/// Returns the `info` line for `event`, if it has one.
fn headline(event: &Event<'_>) -> Option<String> {
    match event {
        Event::ProblemCreated {
            rho, num_variables, ..
        } => Some(format!(
            "Creating an NAE3SAT problem with rho={rho:?} and N={num_variables}"
        )),
        Event::EmbeddingStarted { backend } => {
            Some(format!("Minor embedding problem into {backend}"))
        }
        Event::SendingProblem { backend } => Some(format!("Sending problem to {backend}")),
        Event::Finished { .. } => Some("Results saved under the plots folder.".to_owned()),
        Event::Embedded { .. } | Event::Sampled { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use nae3sat_core::{Record, SampleSet};

    use super::*;

    #[test]
    fn headlines_match_progress_lines() {
        let created = Event::ProblemCreated {
            rho: 3.0,
            num_variables: 75,
            num_clauses: 225,
        };
        assert_eq!(
            headline(&created).as_deref(),
            Some("Creating an NAE3SAT problem with rho=3.0 and N=75")
        );

        let embedding = Event::EmbeddingStarted {
            backend: "Advantage_sim4.1",
        };
        assert_eq!(
            headline(&embedding).as_deref(),
            Some("Minor embedding problem into Advantage_sim4.1")
        );

        let sending = Event::SendingProblem {
            backend: "Adv2_proto_sim1.1",
        };
        assert_eq!(
            headline(&sending).as_deref(),
            Some("Sending problem to Adv2_proto_sim1.1")
        );

        let finished = Event::Finished {
            plot_dir: Path::new("plots"),
        };
        assert_eq!(
            headline(&finished).as_deref(),
            Some("Results saved under the plots folder.")
        );
    }

    #[test]
    fn never_stops_the_sweep() {
        let sampleset = SampleSet::new(
            vec![0, 1],
            vec![Record {
                sample: vec![1, -1],
                energy: -1.0,
                num_occurrences: 3,
                chain_break_fraction: 0.5,
            }],
        );
        let events = [
            Event::Embedded {
                backend: "a",
                chain_lengths: &[1, 3, 2],
            },
            Event::Embedded {
                backend: "a",
                chain_lengths: &[],
            },
            Event::Sampled {
                backend: "a",
                sampleset: &sampleset,
            },
        ];

        let mut log = ProgressLog;
        for event in &events {
            assert_eq!(headline(event), None);
            assert_eq!(log.observe(event), None);
        }
    }
}
