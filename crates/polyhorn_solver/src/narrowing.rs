//! Unsat-core narrowing (§4.4): finds a zero-assignment to some prefix of
//! the template variables that keeps the real constraints satisfiable, by
//! repeatedly asking the solver which of the "x = 0" assumptions it actually
//! needed to prove unsat.

use std::time::Duration;

use polyhorn_algebra::CoeffExpr;
use polyhorn_base::Variable;
use polyhorn_constraint::{CoeffConstraint, RawRelation};
use polyhorn_smt::Status;
use polyhorn_witness::Config;

use crate::error::SolverResult;
use crate::runner::run_script;

fn label_for(index: usize) -> String {
    format!("L{index}")
}

fn build_round_script(base_script: &str, remaining: &[Variable]) -> String {
    let mut s = String::from("(set-option :produce-unsat-cores true)\n");
    s.push_str(base_script);
    for (i, v) in remaining.iter().enumerate() {
        s.push_str(&format!("(assert (! (= {v} 0) :named {}))\n", label_for(i)));
    }
    s.push_str("(check-sat)\n(get-unsat-core)\n");
    s
}

fn parse_core_labels(rest: &str) -> Vec<String> {
    rest.replace(['(', ')'], " ").split_whitespace().map(str::to_string).collect()
}

/// Runs the narrowing loop to a fixed point. `base_script` must already
/// contain the real constraints' declarations and asserts with no trailing
/// `(check-sat)` (build it via [`polyhorn_smt::encode`] with
/// `emit_check_sat: false`). Returns the equalities to prepend to the
/// constraint list, or an empty list if narrowing made no progress — never
/// an error, per §7: an `unknown` response is treated exactly like an empty
/// core.
pub fn narrow_unsat_core(
    cfg: &Config,
    solver_path: Option<&str>,
    base_script: &str,
    template_vars: &[Variable],
    timeout: Duration,
) -> SolverResult<Vec<CoeffConstraint>> {
    let mut remaining: Vec<Variable> = template_vars.to_vec();

    loop {
        if remaining.is_empty() {
            return Ok(Vec::new());
        }

        let script = build_round_script(base_script, &remaining);
        let stdout = run_script(cfg, solver_path, &script, timeout)?;
        if stdout.is_empty() {
            return Ok(Vec::new());
        }

        let (status, rest) = match polyhorn_smt::read_status(&stdout) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(Vec::new()),
        };

        match status {
            Status::Sat => {
                return Ok(remaining
                    .iter()
                    .map(|v| CoeffConstraint::new(CoeffExpr::from_variable(v.clone()), RawRelation::Eq))
                    .collect());
            }
            Status::Unknown => return Ok(Vec::new()),
            Status::Unsat => {
                let core = parse_core_labels(&rest);
                if core.is_empty() {
                    return Ok(Vec::new());
                }
                let before = remaining.len();
                remaining = remaining
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| !core.contains(&label_for(*i)))
                    .map(|(_, v)| v)
                    .collect();
                if remaining.len() == before {
                    return Ok(Vec::new());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_script_names_one_assumption_per_remaining_variable() {
        use polyhorn_base::{VariableKind, VariableTable};
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let b = vt.intern("b", VariableKind::Template);
        let script = build_round_script("(declare-const a Real)\n", &[a, b]);
        assert!(script.contains(":named L0"));
        assert!(script.contains(":named L1"));
        assert!(script.contains("(get-unsat-core)"));
    }

    #[test]
    fn core_labels_are_extracted_from_a_parenthesized_list() {
        let labels = parse_core_labels("(L0 L3)");
        assert_eq!(labels, vec!["L0".to_string(), "L3".to_string()]);
    }

    #[test]
    fn empty_core_text_yields_no_labels() {
        assert!(parse_core_labels("()").is_empty());
    }
}
