use std::rc::Rc;

use polyhorn_base::Variable;
use polyhorn_constraint::{Dnf, PolyConstraint};
use polyhorn_witness::Implication;

use crate::error::{ModelError, ModelResult};

/// `∀programVars. LHS ⇒ RHS`, before expansion (§3 "Horn pair").
#[derive(Debug, Clone)]
pub struct HornPair {
    lhs: Dnf<PolyConstraint>,
    rhs: Dnf<PolyConstraint>,
    program_vars: Rc<Vec<Variable>>,
}

impl HornPair {
    pub fn new(lhs: Dnf<PolyConstraint>, rhs: Dnf<PolyConstraint>, program_vars: Rc<Vec<Variable>>) -> Self {
        HornPair { lhs, rhs, program_vars }
    }

    /// Expands this pair into the flat list of [`Implication`]s a witness
    /// generator discharges one at a time: only the first RHS clause is kept
    /// as the positive obligation, every remaining clause is negated and
    /// folded into the hypotheses, and the result is the Cartesian product
    /// of LHS clauses against RHS atoms.
    pub fn expand(&self) -> ModelResult<Vec<Implication>> {
        let rhs_clauses = self.rhs.clauses();
        let (goal_clause, rest) = rhs_clauses.split_first().ok_or(ModelError::EmptyGoal)?;

        let mut lhs = self.lhs.clone();
        for clause in rest {
            lhs = lhs.and(&Dnf::from_clause(clause.clone()).not());
        }

        let mut out = Vec::new();
        for lhs_clause in lhs.clauses() {
            for goal_atom in goal_clause {
                out.push(Implication::new(lhs_clause.clone(), goal_atom.clone(), self.program_vars.clone()));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_algebra::Polynomial;
    use polyhorn_base::{VariableKind, VariableTable};
    use polyhorn_constraint::RawRelation;

    fn vars() -> (VariableTable, Rc<Vec<Variable>>) {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        (vt, Rc::new(vec![x]))
    }

    #[test]
    fn single_clause_rhs_expands_one_implication_per_goal_atom() {
        let (_vt, vars) = vars();
        let p = Polynomial::variable(vars.clone(), 0);
        let lhs = Dnf::from_atom(PolyConstraint::new(p.clone(), RawRelation::Ge));
        let rhs = Dnf::from_clause(vec![
            PolyConstraint::new(p.clone(), RawRelation::Ge),
            PolyConstraint::new(p, RawRelation::Eq),
        ]);
        let pair = HornPair::new(lhs, rhs, vars);
        let implications = pair.expand().unwrap();
        assert_eq!(implications.len(), 2);
    }

    #[test]
    fn empty_rhs_is_rejected() {
        let (_vt, vars) = vars();
        let p = Polynomial::variable(vars.clone(), 0);
        let lhs = Dnf::from_atom(PolyConstraint::new(p, RawRelation::Ge));
        let pair = HornPair::new(lhs, Dnf::bottom(), vars);
        assert_eq!(pair.expand().unwrap_err(), ModelError::EmptyGoal);
    }

    #[test]
    fn extra_rhs_clauses_fold_into_hypotheses() {
        let (_vt, vars) = vars();
        let p = Polynomial::variable(vars.clone(), 0);
        let lhs = Dnf::top();
        let rhs = Dnf::from_clauses(vec![
            vec![PolyConstraint::new(p.clone(), RawRelation::Ge)],
            vec![PolyConstraint::new(p, RawRelation::Eq)],
        ]);
        let pair = HornPair::new(lhs, rhs, vars);
        let implications = pair.expand().unwrap();
        // one LHS clause (top) x one negated extra RHS clause's atom = 1 implication,
        // carrying the negated second clause as an extra hypothesis.
        assert_eq!(implications.len(), 1);
        assert_eq!(implications[0].hypotheses.len(), 1);
    }
}
