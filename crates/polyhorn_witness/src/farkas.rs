//! The Farkas witness: a nonnegative linear combination of the hypotheses
//! (plus, in the SAT case, a slack for a strict goal) that equals the goal
//! polynomial exactly.

use polyhorn_algebra::{CoeffExpr, Polynomial};
use polyhorn_base::{from_i64, Variable, VariableKind, VariableTable};
use polyhorn_constraint::{CoeffConstraint, Dnf};

use crate::config::Config;
use crate::error::{WitnessError, WitnessResult};
use crate::implication::Implication;
use crate::shared::{find_equality_constraints, nonneg, strictly_positive, wants_unsat_modes};

pub fn generate(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> WitnessResult<Dnf<CoeffConstraint>> {
    if !imp.is_fully_linear() {
        return Err(WitnessError::UnsupportedShape {
            theorem: "farkas",
            reason: "every hypothesis and the goal must be linear".to_string(),
        });
    }
    let mut result = sat(vt, imp);
    if wants_unsat_modes(cfg) {
        result = result.or(&nonstrict_unsat(vt, imp)).or(&strict_unsat(vt, imp));
    }
    Ok(result)
}

fn mint_multipliers(vt: &mut VariableTable, n: usize) -> (Vec<Variable>, Vec<CoeffConstraint>) {
    let mut ys = Vec::with_capacity(n);
    let mut signs = Vec::with_capacity(n);
    for _ in 0..n {
        let y = vt.fresh(VariableKind::AuxFarkas, "y");
        signs.push(nonneg(CoeffExpr::from_variable(y.clone())));
        ys.push(y);
    }
    (ys, signs)
}

fn sat(vt: &mut VariableTable, imp: &Implication) -> Dnf<CoeffConstraint> {
    let vars = imp.program_vars.clone();
    let (ys, mut constraints) = mint_multipliers(vt, imp.hypotheses.len());

    let mut s = Polynomial::zero(vars.clone());
    if imp.goal.is_strict() {
        let y0 = vt.fresh(VariableKind::AuxFarkas, "y");
        constraints.push(nonneg(CoeffExpr::from_variable(y0.clone())));
        s = s.add(&Polynomial::constant(vars.clone(), CoeffExpr::from_variable(y0.clone())));

        let mut strict_sum = CoeffExpr::from_variable(y0);
        for (h, y) in imp.hypotheses.iter().zip(&ys) {
            if h.is_strict() {
                strict_sum = strict_sum.add(&CoeffExpr::from_variable(y.clone()));
            }
        }
        constraints.push(strictly_positive(strict_sum));
    }

    for (h, y) in imp.hypotheses.iter().zip(&ys) {
        s = s.add(&h.body().scale(&CoeffExpr::from_variable(y.clone())));
    }

    constraints.extend(find_equality_constraints(&s, imp.goal.body()));
    Dnf::from_clause(constraints)
}

fn nonstrict_unsat(vt: &mut VariableTable, imp: &Implication) -> Dnf<CoeffConstraint> {
    let vars = imp.program_vars.clone();
    let (ys, mut constraints) = mint_multipliers(vt, imp.hypotheses.len());

    let mut s = Polynomial::zero(vars.clone());
    for (h, y) in imp.hypotheses.iter().zip(&ys) {
        s = s.add(&h.body().scale(&CoeffExpr::from_variable(y.clone())));
    }
    let target = Polynomial::constant(vars, CoeffExpr::from_rational(from_i64(-1)));
    constraints.extend(find_equality_constraints(&s, &target));
    Dnf::from_clause(constraints)
}

fn strict_unsat(vt: &mut VariableTable, imp: &Implication) -> Dnf<CoeffConstraint> {
    let vars = imp.program_vars.clone();
    let (ys, mut constraints) = mint_multipliers(vt, imp.hypotheses.len());

    let mut s = Polynomial::zero(vars.clone());
    let mut strict_sum = CoeffExpr::zero();
    for (h, y) in imp.hypotheses.iter().zip(&ys) {
        s = s.add(&h.body().scale(&CoeffExpr::from_variable(y.clone())));
        if h.is_strict() {
            strict_sum = strict_sum.add(&CoeffExpr::from_variable(y.clone()));
        }
    }
    constraints.push(strictly_positive(strict_sum));
    let target = Polynomial::zero(vars);
    constraints.extend(find_equality_constraints(&s, &target));
    Dnf::from_clause(constraints)
}
