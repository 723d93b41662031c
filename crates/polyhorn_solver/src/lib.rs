//! Drives an SMT solver subprocess over an encoded script (§5, §6).

mod error;
mod locate;
mod narrowing;
mod runner;

pub use error::{SolverError, SolverResult};
pub use locate::locate_binary;
pub use narrowing::narrow_unsat_core;
pub use runner::run_script;

use std::collections::HashMap;
use std::time::Duration;

use polyhorn_base::Variable;
use polyhorn_smt::Status;
use polyhorn_witness::Config;

/// Runs the configured solver over `script` and returns `(status, model)`.
/// A missing binary, a timeout, a crash, or malformed stdout all downgrade
/// to `(Unknown, {})` with a diagnostic on stderr rather than an `Err`
/// (§7(a), (b), (d)); only I/O failures on the script file propagate.
pub fn run_on_solver(
    cfg: &Config,
    solver_path: Option<&str>,
    script: &str,
    template_vars: &[Variable],
    timeout: Duration,
) -> SolverResult<(Status, HashMap<String, String>)> {
    let stdout = runner::run_script(cfg, solver_path, script, timeout)?;
    if stdout.is_empty() {
        return Ok((Status::Unknown, HashMap::new()));
    }

    match polyhorn_smt::parse_result(&stdout, template_vars) {
        Ok(result) => Ok(result),
        Err(e) => {
            eprintln!("polyhorn: {e}");
            Ok((Status::Unknown, HashMap::new()))
        }
    }
}
