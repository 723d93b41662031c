//! The Handelman witness: a nonnegative combination of monoid products of the
//! hypotheses (rather than the hypotheses themselves), letting the goal be a
//! nonlinear polynomial while the hypotheses stay linear.

use std::rc::Rc;

use polyhorn_algebra::{CoeffExpr, Polynomial};
use polyhorn_base::{from_i64, Variable, VariableKind, VariableTable};
use polyhorn_constraint::{CoeffConstraint, Dnf, PolyConstraint};

use crate::config::Config;
use crate::error::{WitnessError, WitnessResult};
use crate::implication::Implication;
use crate::shared::{find_equality_constraints, nonneg, strictly_positive, wants_unsat_modes};

pub fn generate(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> WitnessResult<Dnf<CoeffConstraint>> {
    if !imp.hypotheses_are_linear() {
        return Err(WitnessError::UnsupportedShape {
            theorem: "handelman",
            reason: "every hypothesis must be linear".to_string(),
        });
    }
    let mut result = sat(vt, cfg, imp);
    if wants_unsat_modes(cfg) {
        result = result.or(&nonstrict_unsat(vt, cfg, imp)).or(&strict_unsat(vt, cfg, imp));
    }
    Ok(result)
}

/// All length-`n` nonnegative integer exponent vectors with `Σdᵢ ≤ degree`,
/// in deterministic nested-lexicographic order (first coordinate outermost).
pub fn monoid_exponent_vectors(n: usize, degree: u32) -> Vec<Vec<u32>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for first in 0..=degree {
        for mut rest in monoid_exponent_vectors(n - 1, degree - first) {
            let mut v = vec![first];
            v.append(&mut rest);
            out.push(v);
        }
    }
    out
}

/// `∏ᵢ gᵢ^{dᵢ}`, plus whether the product is strict: every `gᵢ` used with
/// `dᵢ > 0` is strict (vacuously true for the all-zero/constant product).
fn monoid_product(vars: &Rc<Vec<Variable>>, hyps: &[PolyConstraint], exponents: &[u32]) -> (Polynomial, bool) {
    let mut product = Polynomial::constant(vars.clone(), CoeffExpr::one());
    let mut strict = true;
    for (h, &d) in hyps.iter().zip(exponents) {
        if d == 0 {
            continue;
        }
        if !h.is_strict() {
            strict = false;
        }
        for _ in 0..d {
            product = product.mul(h.body());
        }
    }
    (product, strict)
}

fn build_sum(
    vt: &mut VariableTable,
    vars: &Rc<Vec<Variable>>,
    hyps: &[PolyConstraint],
    degree: u32,
) -> (Polynomial, Vec<CoeffConstraint>, CoeffExpr) {
    let mut sum = Polynomial::zero(vars.clone());
    let mut signs = Vec::new();
    let mut strict_sum = CoeffExpr::zero();
    for exponents in monoid_exponent_vectors(hyps.len(), degree) {
        let (product, strict) = monoid_product(vars, hyps, &exponents);
        let c = vt.fresh(VariableKind::AuxHandelman, "c");
        signs.push(nonneg(CoeffExpr::from_variable(c.clone())));
        if strict {
            strict_sum = strict_sum.add(&CoeffExpr::from_variable(c.clone()));
        }
        sum = sum.add(&product.scale(&CoeffExpr::from_variable(c)));
    }
    (sum, signs, strict_sum)
}

fn sat(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> Dnf<CoeffConstraint> {
    let vars = imp.program_vars.clone();
    let (mut sum, mut constraints, strict_sum_hyps) = build_sum(vt, &vars, &imp.hypotheses, cfg.degree_of_sat);

    if imp.goal.is_strict() {
        let y0 = vt.fresh(VariableKind::AuxHandelman, "y");
        constraints.push(nonneg(CoeffExpr::from_variable(y0.clone())));
        sum = sum.add(&Polynomial::constant(vars, CoeffExpr::from_variable(y0.clone())));
        constraints.push(strictly_positive(strict_sum_hyps.add(&CoeffExpr::from_variable(y0))));
    }

    constraints.extend(find_equality_constraints(&sum, imp.goal.body()));
    Dnf::from_clause(constraints)
}

fn nonstrict_unsat(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> Dnf<CoeffConstraint> {
    let vars = imp.program_vars.clone();
    let (sum, mut constraints, _strict_sum) = build_sum(vt, &vars, &imp.hypotheses, cfg.degree_of_nonstrict_unsat);
    let target = Polynomial::constant(vars, CoeffExpr::from_rational(from_i64(-1)));
    constraints.extend(find_equality_constraints(&sum, &target));
    Dnf::from_clause(constraints)
}

fn strict_unsat(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> Dnf<CoeffConstraint> {
    let vars = imp.program_vars.clone();
    let (sum, mut constraints, strict_sum) = build_sum(vt, &vars, &imp.hypotheses, cfg.degree_of_strict_unsat);
    constraints.push(strictly_positive(strict_sum));
    let target = Polynomial::zero(vars);
    constraints.extend(find_equality_constraints(&sum, &target));
    Dnf::from_clause(constraints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_base::VariableTable;
    use polyhorn_constraint::RawRelation;

    #[test]
    fn monoid_vectors_cover_bounded_degree_sum() {
        let vs = monoid_exponent_vectors(2, 2);
        assert_eq!(vs.len(), 6);
        assert!(vs.iter().all(|v| v.iter().sum::<u32>() <= 2));
        assert_eq!(vs[0], vec![0, 0]);
    }

    #[test]
    fn zero_hypotheses_yields_single_empty_product() {
        let vs = monoid_exponent_vectors(0, 3);
        assert_eq!(vs, vec![Vec::<u32>::new()]);
    }

    #[test]
    fn all_zero_exponents_is_vacuously_strict() {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        let vars = Rc::new(vec![x]);
        let h = PolyConstraint::new(Polynomial::variable(vars.clone(), 0), RawRelation::Ge);
        let (_, strict) = monoid_product(&vars, &[h], &[0]);
        assert!(strict);
    }

    #[test]
    fn a_used_nonstrict_factor_makes_the_product_nonstrict() {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        let vars = Rc::new(vec![x]);
        let h = PolyConstraint::new(Polynomial::variable(vars.clone(), 0), RawRelation::Ge);
        let (_, strict) = monoid_product(&vars, &[h], &[1]);
        assert!(!strict);
    }

    #[test]
    fn a_used_strict_factor_makes_the_product_strict() {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        let vars = Rc::new(vec![x]);
        let h = PolyConstraint::new(Polynomial::variable(vars.clone(), 0), RawRelation::Gt);
        let (_, strict) = monoid_product(&vars, &[h], &[1]);
        assert!(strict);
    }
}
