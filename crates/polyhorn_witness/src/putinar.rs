//! The Putinar witness: a sum-of-squares (SOS) certificate per polynomial,
//! built as `bᵀQb` for a Gram matrix `Q = L·Lᵀ` over a monomial basis `b` of
//! half the template degree. Applies unconditionally — hypotheses and goal
//! may both be nonlinear — at the cost of a much larger auxiliary count than
//! Farkas or Handelman.

use std::rc::Rc;

use polyhorn_algebra::{CoeffExpr, ExpVec, Monomial, Polynomial};
use polyhorn_base::{from_i64, Variable, VariableKind, VariableTable};
use polyhorn_constraint::{CoeffConstraint, Dnf, RawRelation};

use crate::config::Config;
use crate::error::WitnessResult;
use crate::handelman::monoid_exponent_vectors;
use crate::implication::Implication;
use crate::shared::{find_equality_constraints, nonneg, strictly_positive, wants_unsat_modes};

pub fn generate(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> WitnessResult<Dnf<CoeffConstraint>> {
    let mut result = sat(vt, cfg, imp);
    if wants_unsat_modes(cfg) {
        result = result.or(&nonstrict_unsat(vt, cfg, imp)).or(&strict_unsat(vt, cfg, imp));
    }
    Ok(result)
}

/// Builds one SOS template `bᵀ(L·Lᵀ)b` of total degree `≤ degree`, replaces
/// every resulting monomial's coefficient with a fresh unconstrained
/// auxiliary tied to it by an equality, and returns the replaced polynomial
/// together with every sign/equality constraint minted along the way
/// (diagonal-of-`L` nonnegativity, then the monomial-coefficient equalities).
fn sos_template(vt: &mut VariableTable, vars: &Rc<Vec<Variable>>, degree: u32) -> (Polynomial, Vec<CoeffConstraint>) {
    let half = degree / 2;
    let basis: Vec<ExpVec> = monoid_exponent_vectors(vars.len(), half)
        .into_iter()
        .map(ExpVec::from_exponents)
        .collect();
    let m = basis.len();

    let mut l: Vec<Vec<Variable>> = Vec::with_capacity(m);
    let mut constraints = Vec::new();
    for i in 0..m {
        let mut row = Vec::with_capacity(i + 1);
        for j in 0..=i {
            let entry = vt.fresh(VariableKind::AuxPutinarSos, "l");
            if i == j {
                constraints.push(nonneg(CoeffExpr::from_variable(entry.clone())));
            }
            row.push(entry);
        }
        l.push(row);
    }

    let mut h = Polynomial::zero(vars.clone());
    for i in 0..m {
        for j in 0..m {
            let shared = i.min(j);
            let mut qij = CoeffExpr::zero();
            for k in 0..=shared {
                qij = qij.add(&CoeffExpr::from_variable(l[i][k].clone()).mul(&CoeffExpr::from_variable(l[j][k].clone())));
            }
            if qij.is_zero() {
                continue;
            }
            let exp = basis[i].add(&basis[j]);
            h = h.add(&Polynomial::from_monomials(vars.clone(), vec![Monomial { exp, coeff: qij }]));
        }
    }

    let mut replaced = Polynomial::zero(vars.clone());
    for mono in h.monomials() {
        let t = vt.fresh(VariableKind::AuxPutinarEta, "t");
        constraints.push(CoeffConstraint::new(CoeffExpr::from_variable(t.clone()).sub(&mono.coeff), RawRelation::Eq));
        replaced = replaced.add(&Polynomial::from_monomials(vars.clone(), vec![Monomial { exp: mono.exp.clone(), coeff: CoeffExpr::from_variable(t) }]));
    }
    (replaced, constraints)
}

/// A free (sign-unconstrained) linear combination of every monomial of
/// degree `≤ degree` over `vars`, each with its own fresh coefficient — the
/// "general template" the strict-UNSAT branch uses for `η_i(V, w)`.
fn general_template(vt: &mut VariableTable, vars: &Rc<Vec<Variable>>, degree: u32) -> Polynomial {
    let mut p = Polynomial::zero(vars.clone());
    for exponents in monoid_exponent_vectors(vars.len(), degree) {
        let c = vt.fresh(VariableKind::AuxStrictWitness, "e");
        p = p.add(&Polynomial::from_monomials(vars.clone(), vec![Monomial { exp: ExpVec::from_exponents(exponents), coeff: CoeffExpr::from_variable(c) }]));
    }
    p
}

fn sat(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> Dnf<CoeffConstraint> {
    let vars = imp.program_vars.clone();
    let (h0, mut constraints) = sos_template(vt, &vars, cfg.degree_of_sat);
    let mut s = h0;
    let mut strict_sum = CoeffExpr::zero();

    if imp.goal.is_strict() {
        let y0 = vt.fresh(VariableKind::AuxPutinarEta, "y");
        constraints.push(nonneg(CoeffExpr::from_variable(y0.clone())));
        s = s.add(&Polynomial::constant(vars.clone(), CoeffExpr::from_variable(y0.clone())));
        strict_sum = strict_sum.add(&CoeffExpr::from_variable(y0));
    }

    for h in &imp.hypotheses {
        let (hi, hi_constraints) = sos_template(vt, &vars, cfg.degree_of_sat);
        constraints.extend(hi_constraints);
        let mut hi_poly = hi;
        if imp.goal.is_strict() && h.is_strict() {
            let y0i = vt.fresh(VariableKind::AuxPutinarEta, "y");
            constraints.push(nonneg(CoeffExpr::from_variable(y0i.clone())));
            hi_poly = hi_poly.add(&Polynomial::constant(vars.clone(), CoeffExpr::from_variable(y0i.clone())));
            strict_sum = strict_sum.add(&CoeffExpr::from_variable(y0i));
        }
        s = s.add(&hi_poly.mul(h.body()));
    }

    if imp.goal.is_strict() {
        constraints.push(strictly_positive(strict_sum));
    }

    constraints.extend(find_equality_constraints(&s, imp.goal.body()));
    Dnf::from_clause(constraints)
}

fn nonstrict_unsat(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> Dnf<CoeffConstraint> {
    let vars = imp.program_vars.clone();
    let (h0, mut constraints) = sos_template(vt, &vars, cfg.degree_of_nonstrict_unsat);
    let mut s = h0;
    for h in &imp.hypotheses {
        let (hi, hi_constraints) = sos_template(vt, &vars, cfg.degree_of_nonstrict_unsat);
        constraints.extend(hi_constraints);
        s = s.add(&hi.mul(h.body()));
    }
    let target = Polynomial::constant(vars, CoeffExpr::from_rational(from_i64(-1)));
    constraints.extend(find_equality_constraints(&s, &target));
    Dnf::from_clause(constraints)
}

/// For each strict hypothesis `g_j`, forms `w_j^{2k} = Σᵢ ηᵢ(V,w)·(gᵢ − wᵢ²)`
/// over fresh program-level auxiliaries `w` (one per hypothesis) and general
/// templates `η_i`, and returns the coefficient-wise equality system that
/// results. A clause per strict hypothesis: any one succeeding witnesses
/// `LHS ⇒ ⊥` (§4.2.3), so callers see them as alternatives in a disjunction
/// rather than a conjunction.
fn strict_unsat(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> Dnf<CoeffConstraint> {
    let base_vars = imp.program_vars.clone();
    let n = imp.hypotheses.len();
    let ws: Vec<Variable> = (0..n).map(|_| vt.fresh(VariableKind::AuxStrictWitness, "w")).collect();
    let extended_vars = {
        let mut v = (*base_vars).clone();
        v.extend(ws.iter().cloned());
        Rc::new(v)
    };

    let mut clauses = Vec::new();
    for (j, hj) in imp.hypotheses.iter().enumerate() {
        if !hj.is_strict() {
            continue;
        }
        let mut rhs = Polynomial::zero(extended_vars.clone());
        for (i, hi) in imp.hypotheses.iter().enumerate() {
            let eta_i = general_template(vt, &extended_vars, cfg.degree_of_strict_unsat);
            let gi_ext = hi.body().add_program_variables(&ws);
            let wi_index = base_vars.len() + i;
            let wi = Polynomial::variable(extended_vars.clone(), wi_index);
            let diff = gi_ext.sub(&wi.mul(&wi));
            rhs = rhs.add(&eta_i.mul(&diff));
        }

        let wj_index = base_vars.len() + j;
        let mut wj_pow = Polynomial::constant(extended_vars.clone(), CoeffExpr::one());
        for _ in 0..(2 * cfg.max_d_of_strict) {
            wj_pow = wj_pow.mul(&Polynomial::variable(extended_vars.clone(), wj_index));
        }

        clauses.push(find_equality_constraints(&wj_pow, &rhs));
    }
    Dnf::from_clauses(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_base::VariableKind as VK;
    use polyhorn_constraint::{PolyConstraint, RawRelation as RR};

    fn setup() -> (VariableTable, Rc<Vec<Variable>>) {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VK::Program);
        (vt, Rc::new(vec![x]))
    }

    #[test]
    fn sos_template_basis_grows_with_degree() {
        let (mut vt, vars) = setup();
        let (p2, _) = sos_template(&mut vt, &vars, 2);
        let (p4, _) = sos_template(&mut vt, &vars, 4);
        assert!(p2.degree() <= 2);
        assert!(p4.degree() <= 4);
    }

    #[test]
    fn sat_mode_handles_nonlinear_goal() {
        let (mut vt, vars) = setup();
        let x = Polynomial::variable(vars.clone(), 0);
        let hyp = PolyConstraint::new(x.clone(), RR::Ge);
        let goal = PolyConstraint::new(x.mul(&x), RR::Ge);
        let imp = Implication::new(vec![hyp], goal, vars);
        let cfg = Config { sat_heuristic: true, degree_of_sat: 2, ..Config::new(crate::config::TheoremName::Putinar) };
        let dnf = generate(&mut vt, &cfg, &imp).unwrap();
        assert_eq!(dnf.clauses().len(), 1);
    }

    #[test]
    fn strict_unsat_emits_one_clause_per_strict_hypothesis() {
        let (mut vt, vars) = setup();
        let x = Polynomial::variable(vars.clone(), 0);
        let strict_hyp = PolyConstraint::new(x.clone(), RR::Gt);
        let nonstrict_hyp = PolyConstraint::new(x.clone(), RR::Ge);
        let goal = PolyConstraint::new(x, RR::Ge);
        let imp = Implication::new(vec![strict_hyp, nonstrict_hyp], goal, vars);
        let cfg = Config { max_d_of_strict: 1, degree_of_strict_unsat: 1, ..Config::new(crate::config::TheoremName::Putinar) };
        let dnf = strict_unsat(&mut vt, &cfg, &imp);
        assert_eq!(dnf.clauses().len(), 1);
    }
}
