/// A disjunction of conjunctions: `⋁ᵢ ⋀ⱼ Cᵢⱼ`.
///
/// Generic over the atomic constraint type so the same closure-under-`∧ ∨ ¬`
/// machinery backs both [`crate::PolyConstraint`] DNFs (a Horn clause's
/// hypotheses/goal) and [`crate::CoeffConstraint`] DNFs (a witness
/// generator's output).
///
/// The empty clause list is the identity for [`Dnf::or`] (`false`); the
/// single-empty-clause list (`bottom_up`: one clause with zero atoms) is the
/// identity for [`Dnf::and`] (`true`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dnf<C> {
    clauses: Vec<Vec<C>>,
}

impl<C: Clone> Dnf<C> {
    /// `false`: no satisfying clause.
    pub fn bottom() -> Self {
        Dnf { clauses: Vec::new() }
    }

    /// `true`: the single empty (vacuously satisfied) clause.
    pub fn top() -> Self {
        Dnf { clauses: vec![Vec::new()] }
    }

    pub fn from_atom(atom: C) -> Self {
        Dnf { clauses: vec![vec![atom]] }
    }

    pub fn from_clause(clause: Vec<C>) -> Self {
        Dnf { clauses: vec![clause] }
    }

    pub fn from_clauses(clauses: Vec<Vec<C>>) -> Self {
        Dnf { clauses }
    }

    pub fn clauses(&self) -> &[Vec<C>] {
        &self.clauses
    }

    pub fn into_clauses(self) -> Vec<Vec<C>> {
        self.clauses
    }

    pub fn is_bottom(&self) -> bool {
        self.clauses.is_empty()
    }

    /// `∨`: concatenate the clause lists.
    pub fn or(&self, other: &Self) -> Self {
        let mut clauses = self.clauses.clone();
        clauses.extend(other.clauses.iter().cloned());
        Dnf { clauses }
    }

    /// `∧`: Cartesian concatenation of clauses.
    pub fn and(&self, other: &Self) -> Self {
        let mut clauses = Vec::with_capacity(self.clauses.len() * other.clauses.len().max(1));
        for a in &self.clauses {
            for b in &other.clauses {
                let mut clause = a.clone();
                clause.extend(b.iter().cloned());
                clauses.push(clause);
            }
        }
        Dnf { clauses }
    }
}

/// Types whose atomic negation is defined, so [`Dnf::not`] can distribute
/// De Morgan's laws down to the atoms and re-conjoin.
pub trait Negatable {
    fn negate(&self) -> Self;
}

impl Negatable for crate::PolyConstraint {
    fn negate(&self) -> Self {
        crate::PolyConstraint::negate(self)
    }
}

impl Negatable for crate::CoeffConstraint {
    fn negate(&self) -> Self {
        crate::CoeffConstraint::negate(self)
    }
}

impl<C: Clone + Negatable> Dnf<C> {
    /// `¬`: `¬(⋁ᵢ ⋀ⱼ Cᵢⱼ) = ⋀ᵢ ⋁ⱼ ¬Cᵢⱼ`, redistributed back into DNF form by
    /// Cartesian-conjoining each clause's negated-atom disjunction with the
    /// accumulator (starting from `top()`, the identity for `∧`).
    pub fn not(&self) -> Self {
        let mut acc = Dnf::top();
        for clause in &self.clauses {
            let clause_negation = Dnf {
                clauses: clause.iter().map(|c| vec![c.negate()]).collect(),
            };
            acc = acc.and(&clause_negation);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_algebra::{CoeffExpr, Polynomial};
    use polyhorn_base::{VariableKind, VariableTable};
    use std::rc::Rc;

    use crate::relation::RawRelation;
    use crate::PolyConstraint;

    fn setup() -> (Rc<Vec<polyhorn_base::Variable>>, PolyConstraint, PolyConstraint) {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        let y = vt.intern("y", VariableKind::Program);
        let vars = Rc::new(vec![x, y]);
        let x_gt_0 = PolyConstraint::new(Polynomial::variable(vars.clone(), 0), RawRelation::Gt);
        let y_eq_0 = PolyConstraint::new(
            Polynomial::constant(vars.clone(), CoeffExpr::zero()).sub(&Polynomial::variable(vars.clone(), 1)),
            RawRelation::Eq,
        );
        (vars, x_gt_0, y_eq_0)
    }

    #[test]
    fn or_concatenates_clauses() {
        let (_vars, a, b) = setup();
        let d = Dnf::from_atom(a).or(&Dnf::from_atom(b));
        assert_eq!(d.clauses().len(), 2);
    }

    #[test]
    fn and_is_cartesian_concatenation() {
        let (_vars, a, b) = setup();
        let left = Dnf::from_clauses(vec![vec![a.clone()], vec![b.clone()]]);
        let right = Dnf::from_atom(a.clone());
        let d = left.and(&right);
        assert_eq!(d.clauses().len(), 2);
        assert_eq!(d.clauses()[0].len(), 2);
    }

    #[test]
    fn double_negation_is_identity() {
        let (_vars, a, b) = setup();
        let d = Dnf::from_clauses(vec![vec![a.clone(), b.clone()]]).or(&Dnf::from_atom(a));
        let nn = d.not().not();
        assert_eq!(nn, d);
    }

    #[test]
    fn and_distributes_over_or() {
        let (_vars, a, b) = setup();
        let d = Dnf::from_atom(a.clone());
        let e = Dnf::from_atom(a.clone());
        let f = Dnf::from_atom(b.clone());
        let lhs = d.and(&e.or(&f));
        let rhs = d.and(&e).or(&d.and(&f));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn bottom_is_identity_for_or_and_top_for_and() {
        let (_vars, a, _b) = setup();
        let d = Dnf::from_atom(a);
        assert_eq!(d.or(&Dnf::bottom()), d);
        assert_eq!(d.and(&Dnf::top()), d);
    }
}
