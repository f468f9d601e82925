use std::path::Path;

use nae3sat_core::SampleSet;

/// Progress of a sweep, emitted to the observer as each step begins or ends.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A problem is about to be generated for `rho`.
    ProblemCreated {
        rho: f64,
        num_variables: usize,
        num_clauses: usize,
    },

    /// Minor embedding onto `backend` is starting.
    EmbeddingStarted { backend: &'a str },

    /// An embedding was found.
    Embedded {
        backend: &'a str,
        chain_lengths: &'a [usize],
    },

    /// The embedded problem is being submitted to `backend`.
    SendingProblem { backend: &'a str },

    /// `backend` returned samples, already mapped back to the problem's
    /// variables.
    Sampled {
        backend: &'a str,
        sampleset: &'a SampleSet,
    },

    /// Every ratio has been processed and all plots are written.
    Finished { plot_dir: &'a Path },
}
