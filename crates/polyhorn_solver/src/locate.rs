use std::path::{Path, PathBuf};

use polyhorn_witness::SolverName;

use crate::error::SolverError;

fn exe_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

fn on_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Locates the solver binary by (a) an explicit `--solver-path`, (b) `PATH`
/// lookup of the solver name, (c) a packaged fallback under `./solver/<name>`
/// (§6 "Solver invocation").
pub fn locate_binary(solver_name: SolverName, solver_path: Option<&str>) -> Result<PathBuf, SolverError> {
    if let Some(configured) = solver_path {
        let p = Path::new(configured);
        return if p.is_file() {
            Ok(p.to_path_buf())
        } else {
            Err(SolverError::NotFound(configured.to_string()))
        };
    }

    let name = exe_name(solver_name.binary_name());
    if let Some(found) = on_path(&name) {
        return Ok(found);
    }

    let fallback = Path::new("./solver").join(&name);
    if fallback.is_file() {
        return Ok(fallback);
    }

    Err(SolverError::NotFound(solver_name.binary_name().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_to_a_missing_file_is_not_found() {
        let err = locate_binary(SolverName::Z3, Some("/nonexistent/path/to/z3")).unwrap_err();
        assert!(matches!(err, SolverError::NotFound(_)));
    }
}
