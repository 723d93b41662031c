use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;

use polyhorn_witness::Config;

use crate::error::SolverResult;
use crate::locate::locate_binary;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

enum Outcome {
    Finished(String),
    TimedOut,
    Crashed(String),
}

fn spawn_and_capture(bin: &Path, script_path: &Path, timeout: Duration) -> SolverResult<Outcome> {
    let mut child: Child = Command::new(bin)
        .arg(script_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            let mut stdout = String::new();
            if let Some(mut out) = child.stdout.take() {
                out.read_to_string(&mut stdout)?;
            }
            if status.success() {
                return Ok(Outcome::Finished(stdout));
            }
            let mut stderr = String::new();
            if let Some(mut err) = child.stderr.take() {
                let _ = err.read_to_string(&mut stderr);
            }
            return Ok(Outcome::Crashed(stderr));
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(Outcome::TimedOut);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Writes `script` to a guarded temp file, runs the configured solver on it,
/// and returns its raw stdout. The temp file is released on every exit path
/// (§5), including the timeout-kill path. A not-found binary, a timeout, or
/// a nonzero exit are never returned as an error here — each is reported to
/// stderr and surfaces to the caller as an empty string, which every caller
/// in this crate treats as `unknown` with no further data.
pub fn run_script(cfg: &Config, solver_path: Option<&str>, script: &str, timeout: Duration) -> SolverResult<String> {
    let bin = match locate_binary(cfg.solver_name, solver_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("polyhorn: {e}");
            return Ok(String::new());
        }
    };

    let mut file = NamedTempFile::new()?;
    file.write_all(script.as_bytes())?;
    file.flush()?;

    let outcome = spawn_and_capture(&bin, file.path(), timeout);
    drop(file);

    match outcome? {
        Outcome::Finished(stdout) => Ok(stdout),
        Outcome::TimedOut => {
            eprintln!("polyhorn: solver timed out after {:?}", timeout);
            Ok(String::new())
        }
        Outcome::Crashed(stderr) => {
            eprintln!("polyhorn: solver crashed: {stderr}");
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_witness::TheoremName;

    #[test]
    fn missing_binary_downgrades_to_empty_stdout() {
        let cfg = Config::new(TheoremName::Farkas);
        let stdout = run_script(&cfg, Some("/nonexistent/bin"), "(check-sat)", Duration::from_secs(1)).unwrap();
        assert!(stdout.is_empty());
    }

    #[test]
    fn a_binary_that_echoes_its_argument_is_captured() {
        let cfg = Config::new(TheoremName::Farkas);
        let stdout = run_script(&cfg, Some("/bin/echo"), "(check-sat)", Duration::from_secs(5)).unwrap();
        assert!(!stdout.is_empty());
    }
}
