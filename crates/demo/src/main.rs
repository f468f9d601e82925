use anyhow::{Context, Result};
use nae3sat_core::TopologyKind;
use nae3sat_demo::{ProgressLog, SweepConfig, pipeline};
use nae3sat_hardware::{QpuConfig, SolverFilter, SolverRegistry};
use nae3sat_solvers::{generators::Nae3sat, minorminer::MinorMiner};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .init();

    let config = SweepConfig::default();

    let registry = SolverRegistry::simulated(QpuConfig::default())
        .context("failed to build the simulated solvers")?;
    let advantage = registry
        .get(&SolverFilter::topology(TopologyKind::Pegasus))
        .context("failed to acquire a Pegasus solver")?;
    let advantage2 = registry
        .get(&SolverFilter::topology(TopologyKind::Zephyr))
        .context("failed to acquire a Zephyr solver")?;

    let output_root = std::env::current_dir().context("failed to read the working directory")?;
    let summary = pipeline::run(
        &config,
        &Nae3sat::new(),
        &MinorMiner::default(),
        &[advantage, advantage2],
        &output_root,
        ProgressLog,
    )
    .context("NAE3SAT sweep failed")?;

    tracing::debug!(runs = summary.runs.len(), status = ?summary.status, "sweep finished");
    Ok(())
}
