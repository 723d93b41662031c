//! Equality-elimination: repeatedly finds a constraint of the shape
//! `variable = constant` inside a clause and substitutes it out of every
//! other constraint, shrinking the system an SMT solver has to discharge.
//! Applied only when exactly one witness mode produced the clause (§4.4) —
//! applying it across an `∨` of modes would conflate unrelated auxiliaries.

use polyhorn_base::Variable;
use polyhorn_constraint::CoeffConstraint;

/// Runs equality elimination to a fixed point over a single DNF clause.
/// Re-scans from the top after every substitution since eliminating one
/// variable can expose a new variable-to-constant shape in a constraint that
/// previously had too many terms.
pub fn eliminate(mut clause: Vec<CoeffConstraint>) -> Vec<CoeffConstraint> {
    loop {
        let found = clause
            .iter()
            .enumerate()
            .find_map(|(i, c)| c.as_variable_definition().map(|(var, value)| (i, var, value)));

        let Some((index, var, value)) = found else {
            return clause;
        };

        clause.remove(index);
        clause = substitute_all(clause, &var, &value);
    }
}

fn substitute_all(clause: Vec<CoeffConstraint>, var: &Variable, value: &polyhorn_base::Rational) -> Vec<CoeffConstraint> {
    clause.into_iter().map(|c| c.substitute(var, value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_algebra::CoeffExpr;
    use polyhorn_base::{VariableKind, VariableTable};
    use polyhorn_constraint::RawRelation;

    #[test]
    fn eliminates_a_chain_of_definitions() {
        // a = 3, a*b - 1 >= 0  ==>  3*b - 1 >= 0
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let b = vt.intern("b", VariableKind::Template);
        let a_eq_3 = CoeffConstraint::new(
            CoeffExpr::from_variable(a.clone()).sub(&CoeffExpr::from_rational(polyhorn_base::from_i64(3))),
            RawRelation::Eq,
        );
        let ab_minus_1 = CoeffConstraint::new(
            CoeffExpr::from_variable(a.clone()).mul(&CoeffExpr::from_variable(b.clone())).sub(&CoeffExpr::from_rational(polyhorn_base::from_i64(1))),
            RawRelation::Ge,
        );
        let result = eliminate(vec![a_eq_3, ab_minus_1]);
        assert_eq!(result.len(), 1);
        let expected = CoeffConstraint::new(
            CoeffExpr::from_variable(b).scale(&polyhorn_base::from_i64(3)).sub(&CoeffExpr::from_rational(polyhorn_base::from_i64(1))),
            RawRelation::Ge,
        );
        assert_eq!(result[0], expected);
    }

    #[test]
    fn leaves_clause_unchanged_when_no_definition_present() {
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let b = vt.intern("b", VariableKind::Template);
        let c = CoeffConstraint::new(CoeffExpr::from_variable(a).sub(&CoeffExpr::from_variable(b)), RawRelation::Ge);
        let result = eliminate(vec![c.clone()]);
        assert_eq!(result, vec![c]);
    }
}
