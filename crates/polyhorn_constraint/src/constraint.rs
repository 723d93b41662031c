use polyhorn_algebra::{CoeffExpr, Polynomial, ToSmt};
use polyhorn_base::{Rational, Variable};

use crate::relation::{RawRelation, Relation};

/// `p ▷ 0` for a [`Polynomial`] `p` over program variables — the shape every
/// hypothesis `g_i` and goal `f` of a Horn clause takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyConstraint {
    body: Polynomial,
    relation: Relation,
}

impl PolyConstraint {
    pub fn new(body: Polynomial, relation: RawRelation) -> Self {
        let (relation, negate_body) = relation.normalize();
        let body = if negate_body { body.neg() } else { body };
        PolyConstraint { body, relation }
    }

    pub fn body(&self) -> &Polynomial {
        &self.body
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn is_strict(&self) -> bool {
        self.relation.is_strict()
    }

    pub fn negate(&self) -> Self {
        let (relation, negate_body) = self.relation.negate();
        let body = if negate_body { self.body.neg() } else { self.body.clone() };
        PolyConstraint { body, relation }
    }

    pub fn to_smt(&self) -> String {
        format!("({} {} 0)", self.relation.as_smt_op(), self.body.to_smt())
    }
}

/// `c ▷ 0` for a [`CoeffExpr`] `c` over template/auxiliary variables — the
/// shape every constraint a witness generator emits takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoeffConstraint {
    body: CoeffExpr,
    relation: Relation,
}

impl CoeffConstraint {
    pub fn new(body: CoeffExpr, relation: RawRelation) -> Self {
        let (relation, negate_body) = relation.normalize();
        let body = if negate_body { body.neg() } else { body };
        CoeffConstraint { body, relation }
    }

    pub fn body(&self) -> &CoeffExpr {
        &self.body
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn negate(&self) -> Self {
        let (relation, negate_body) = self.relation.negate();
        let body = if negate_body { self.body.neg() } else { self.body.clone() };
        CoeffConstraint { body, relation }
    }

    pub fn to_smt(&self) -> String {
        format!("({} {} 0)", self.relation.as_smt_op(), self.body.to_smt())
    }

    /// Classifies this constraint as an equality-of-variable-to-constant:
    /// sign `=` and a body with ≤2 terms whose combined variable multisets
    /// contain exactly one variable, appearing with exponent 1.
    pub fn as_variable_definition(&self) -> Option<(Variable, Rational)> {
        if self.relation != Relation::Eq {
            return None;
        }
        self.body.as_variable_definition()
    }

    /// Substitutes `var ↦ value` into the body, rebuilding (never mutating)
    /// the underlying `CoeffExpr`.
    pub fn substitute(&self, var: &Variable, value: &Rational) -> Self {
        CoeffConstraint {
            body: self.body.substitute(var, value),
            relation: self.relation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_base::{VariableKind, VariableTable};
    use std::rc::Rc;

    #[test]
    fn lt_is_normalized_to_gt_by_negating_body() {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        let vars = Rc::new(vec![x.clone()]);
        let p = Polynomial::variable(vars.clone(), 0);
        let c = PolyConstraint::new(p.clone(), RawRelation::Lt);
        assert_eq!(c.relation(), Relation::Gt);
        assert_eq!(c.body(), &p.neg());
    }

    #[test]
    fn negate_round_trips() {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        let vars = Rc::new(vec![x]);
        let p = Polynomial::variable(vars, 0);
        let c = PolyConstraint::new(p, RawRelation::Ge);
        let nn = c.negate().negate();
        assert_eq!(nn, c);
    }

    #[test]
    fn equality_classification_requires_eq_sign() {
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let body = CoeffExpr::from_variable(a);
        let not_eq = CoeffConstraint::new(body.clone(), RawRelation::Ge);
        assert!(not_eq.as_variable_definition().is_none());
        let eq = CoeffConstraint::new(body, RawRelation::Eq);
        assert!(eq.as_variable_definition().is_some());
    }
}
