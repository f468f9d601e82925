//! Runs the `nae3sat` binary end to end in a scratch directory.
//!
//! Set `SKIP_INT_TESTS` to skip, or `DEBUG_OUTPUT` to print what the binary
//! wrote.

use std::{env, process::Command};

use tempfile::TempDir;

const PLOTS: [&str; 4] = [
    "rho_210_chain_length.png",
    "rho_210_energies.png",
    "rho_300_chain_length.png",
    "rho_300_energies.png",
];

#[test]
fn embeds_samples_and_plots_on_both_topologies() {
    if env::var_os("SKIP_INT_TESTS").is_some() {
        return;
    }

    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_nae3sat"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if env::var_os("DEBUG_OUTPUT").is_some() {
        println!("{stdout}");
        eprintln!("{stderr}");
    }
    assert!(output.status.success(), "nae3sat failed:\n{stderr}");

    let log = stdout.to_uppercase();
    for backend in ["ADV", "ADV2_PROTO"] {
        for step in ["MINOR EMBEDDING PROBLEM INTO", "SENDING PROBLEM TO"] {
            let line = format!("{step} {backend}");
            assert!(log.contains(&line), "missing {line:?} in:\n{stdout}");
        }
    }
    assert!(log.contains("CREATING AN NAE3SAT PROBLEM WITH RHO=2.1 AND N=75"));
    assert!(log.contains("CREATING AN NAE3SAT PROBLEM WITH RHO=3.0 AND N=75"));
    assert!(log.contains("RESULTS SAVED UNDER THE PLOTS FOLDER."));
    assert!(!log.contains("ERROR"));
    assert!(!log.contains("WARNING"));

    for name in PLOTS {
        let path = dir.path().join("plots").join(name);
        let len = std::fs::metadata(&path)
            .unwrap_or_else(|err| panic!("{} missing: {err}", path.display()))
            .len();
        assert!(len > 0, "{} is empty", path.display());
    }
}
