//! Turns a compiled [`PositiveModel`] output into an SMT-LIB2 script (§4.5).

use std::collections::BTreeSet;

use polyhorn_base::Variable;
use polyhorn_constraint::{CoeffConstraint, Dnf};
use polyhorn_model::Precondition;
use polyhorn_witness::{Config, SolverName};

fn solver_options(cfg: &Config) -> Vec<&'static str> {
    let mut opts = vec!["(set-option :produce-models true)"];
    if matches!(cfg.solver_name, SolverName::MathSat) {
        opts.push("(set-logic QF_NRA)");
    }
    opts
}

fn dnf_to_smt(dnf: &Dnf<CoeffConstraint>) -> String {
    if dnf.is_bottom() {
        return "false".to_string();
    }
    let clause_strs: Vec<String> = dnf
        .clauses()
        .iter()
        .map(|clause| match clause.as_slice() {
            [] => "true".to_string(),
            [single] => single.to_smt(),
            many => format!("(and {})", many.iter().map(CoeffConstraint::to_smt).collect::<Vec<_>>().join(" ")),
        })
        .collect();
    match clause_strs.as_slice() {
        [single] => single.clone(),
        many => format!("(or {})", many.join(" ")),
    }
}

/// Assembles the option/declaration/assert/tail sections and joins them with
/// newlines. `emit_check_sat` controls whether the trailing `(check-sat)` /
/// `(get-value …)` pair is appended on top of whatever directives the model
/// already carries (the `solve` subcommand wants both; `emit` leaves that to
/// the caller).
pub fn encode(
    cfg: &Config,
    template_vars: &[Variable],
    dnfs: &[Dnf<CoeffConstraint>],
    preconditions: &[Precondition],
    directives: &[String],
    emit_check_sat: bool,
) -> String {
    let mut vars: BTreeSet<Variable> = template_vars.iter().cloned().collect();
    for dnf in dnfs {
        for clause in dnf.clauses() {
            vars.extend(collect_clause_variables(clause));
        }
    }
    for p in preconditions {
        match p {
            Precondition::Standalone(d) => {
                for clause in d.clauses() {
                    vars.extend(collect_clause_variables(clause));
                }
            }
            Precondition::Implication(a, b) => {
                for clause in a.clauses().iter().chain(b.clauses()) {
                    vars.extend(collect_clause_variables(clause));
                }
            }
        }
    }

    let mut lines = Vec::new();
    lines.extend(solver_options(cfg).into_iter().map(str::to_string));

    let sort = if cfg.integer_arithmetic { "Int" } else { "Real" };
    for v in &vars {
        lines.push(format!("(declare-const {v} {sort})"));
    }

    for dnf in dnfs {
        lines.push(format!("(assert {})", dnf_to_smt(dnf)));
    }

    for p in preconditions {
        match p {
            Precondition::Standalone(d) => lines.push(format!("(assert {})", dnf_to_smt(d))),
            Precondition::Implication(a, b) => {
                lines.push(format!("(assert (=> {} {}))", dnf_to_smt(a), dnf_to_smt(b)))
            }
        }
    }

    lines.extend(directives.iter().cloned());

    if emit_check_sat {
        lines.push("(check-sat)".to_string());
        if !template_vars.is_empty() {
            let names = template_vars.iter().map(Variable::name).collect::<Vec<_>>().join(" ");
            lines.push(format!("(get-value ({names}))"));
        }
    }

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

fn collect_clause_variables(clause: &[CoeffConstraint]) -> Vec<Variable> {
    let mut out = Vec::new();
    for c in clause {
        for term in c.body().terms() {
            for (v, _) in term.vars.iter() {
                out.push(v.clone());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_algebra::CoeffExpr;
    use polyhorn_base::{VariableKind, VariableTable};
    use polyhorn_constraint::RawRelation;
    use polyhorn_witness::TheoremName;

    #[test]
    fn declares_template_variables_even_when_unused() {
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let cfg = Config::new(TheoremName::Farkas);
        let script = encode(&cfg, &[a], &[], &[], &[], true);
        assert!(script.contains("(declare-const a Real)"));
    }

    #[test]
    fn integer_arithmetic_switches_the_declared_sort() {
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let mut cfg = Config::new(TheoremName::Farkas);
        cfg.integer_arithmetic = true;
        let script = encode(&cfg, &[a], &[], &[], &[], true);
        assert!(script.contains("(declare-const a Int)"));
    }

    #[test]
    fn single_clause_dnf_prints_without_or_and_wrapper() {
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let c = CoeffConstraint::new(CoeffExpr::from_variable(a.clone()), RawRelation::Ge);
        let dnf = Dnf::from_atom(c);
        let cfg = Config::new(TheoremName::Farkas);
        let script = encode(&cfg, &[a], &[dnf], &[], &[], false);
        assert!(script.contains("(assert (>= a 0))"));
    }

    #[test]
    fn multi_clause_dnf_wraps_in_or_and() {
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let b = vt.intern("b", VariableKind::Template);
        let ca = CoeffConstraint::new(CoeffExpr::from_variable(a.clone()), RawRelation::Ge);
        let cb = CoeffConstraint::new(CoeffExpr::from_variable(b.clone()), RawRelation::Ge);
        let dnf = Dnf::from_clauses(vec![vec![ca.clone(), cb.clone()], vec![ca]]);
        let cfg = Config::new(TheoremName::Farkas);
        let script = encode(&cfg, &[a, b], &[dnf], &[], &[], false);
        assert!(script.contains("(or (and (>= a 0) (>= b 0)) (>= a 0))"));
    }

    #[test]
    fn check_sat_emits_get_value_over_template_vars() {
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let cfg = Config::new(TheoremName::Farkas);
        let script = encode(&cfg, &[a], &[], &[], &[], true);
        assert!(script.ends_with("(check-sat)\n(get-value (a))\n"));
    }
}
