use std::collections::HashSet;

use polyhorn_algebra::{ExpVec, Polynomial};
use polyhorn_constraint::{CoeffConstraint, RawRelation};

use crate::config::Config;

/// `findEqualityConstraints(L, R) = { coeffL[e] − coeffR[e] = 0 : e ∈ supp(L) ∪ supp(R) }`
///
/// The scaffolding shared by all three witness generators: having built a
/// polynomial `S` that is supposed to equal some `target`, this asserts
/// coefficient-wise equality degree by degree.
pub fn find_equality_constraints(l: &Polynomial, r: &Polynomial) -> Vec<CoeffConstraint> {
    let mut seen: HashSet<ExpVec> = HashSet::new();
    let mut exps: Vec<ExpVec> = Vec::new();
    for e in l.support().chain(r.support()) {
        if seen.insert(e.clone()) {
            exps.push(e.clone());
        }
    }
    exps.sort();
    exps.into_iter()
        .map(|e| {
            let diff = l.coeff_of(&e).sub(&r.coeff_of(&e));
            CoeffConstraint::new(diff, RawRelation::Eq)
        })
        .collect()
}

/// A nonnegativity sign constraint `c ≥ 0` for a freshly minted auxiliary.
pub fn nonneg(c: polyhorn_algebra::CoeffExpr) -> CoeffConstraint {
    CoeffConstraint::new(c, RawRelation::Ge)
}

/// A strict-positivity sign constraint `c > 0`.
pub fn strictly_positive(c: polyhorn_algebra::CoeffExpr) -> CoeffConstraint {
    CoeffConstraint::new(c, RawRelation::Gt)
}

/// `true` unless `sat_heuristic` opts out of also proving the hypotheses
/// themselves contradictory — callers OR the SAT clause with the two UNSAT
/// variants only when this holds (§4.1/§5). A plain boolean rather than a
/// closure-taking combinator: each theorem mints fresh auxiliaries from the
/// same `&mut VariableTable` across all three modes, and sequential
/// statements borrow it far more simply than three closures captured at once
/// ever could.
pub fn wants_unsat_modes(cfg: &Config) -> bool {
    !cfg.sat_heuristic
}
