use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use polyhorn_base::Variable;

use crate::coeff_expr::CoeffExpr;

/// An exponent vector `e` of length `|V|`, ordered `(|e|, lexicographic)` —
/// the same shape of canonical order [`crate::Multiset`] uses for coefficient
/// terms, specialized to a dense vector since program variables are fixed
/// and small in number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpVec(Vec<u32>);

impl ExpVec {
    pub fn zero(len: usize) -> Self {
        ExpVec(vec![0; len])
    }

    pub fn unit(len: usize, index: usize) -> Self {
        let mut v = vec![0; len];
        v[index] = 1;
        ExpVec(v)
    }

    /// Builds an exponent vector directly from its exponents, used by the
    /// monomial-basis enumeration Putinar's SOS template needs.
    pub fn from_exponents(exponents: Vec<u32>) -> Self {
        ExpVec(exponents)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn degree(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// At most one nonzero exponent and it equals 1 (the `|e| ≤ 1` linear case).
    pub fn is_linear(&self) -> bool {
        self.degree() <= 1
    }

    pub fn add(&self, other: &ExpVec) -> ExpVec {
        debug_assert_eq!(self.0.len(), other.0.len());
        ExpVec(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }

    /// Extend this exponent vector with `extra` trailing zero exponents, used
    /// by [`Polynomial::add_program_variables`].
    fn extended(&self, extra: usize) -> ExpVec {
        let mut v = self.0.clone();
        v.extend(std::iter::repeat(0).take(extra));
        ExpVec(v)
    }
}

impl PartialOrd for ExpVec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExpVec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.degree()
            .cmp(&other.degree())
            .then_with(|| self.0.cmp(&other.0))
    }
}

/// A single monomial `coeff · x^e` of a [`Polynomial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomial {
    pub exp: ExpVec,
    pub coeff: CoeffExpr,
}

/// A multivariate polynomial over a fixed, ordered list of program variables
/// `V`, with [`CoeffExpr`] coefficients.
///
/// Canonical form: monomials sorted by `(|e|, lex e)`, at most one monomial
/// per distinct exponent vector, zero-coefficient monomials dropped. The
/// `index` invariant (every monomial in `monomials` appears in `index`) is
/// maintained by every constructor; there is no way to observe a
/// `Polynomial` that violates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    vars: Rc<Vec<Variable>>,
    monomials: Vec<Monomial>,
    index: HashMap<ExpVec, usize>,
}

impl Polynomial {
    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    pub fn zero(vars: Rc<Vec<Variable>>) -> Self {
        Polynomial {
            vars,
            monomials: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn constant(vars: Rc<Vec<Variable>>, coeff: CoeffExpr) -> Self {
        Polynomial::from_monomials(vars.clone(), vec![Monomial { exp: ExpVec::zero(vars.len()), coeff }])
    }

    pub fn variable(vars: Rc<Vec<Variable>>, index: usize) -> Self {
        Polynomial::from_monomials(
            vars.clone(),
            vec![Monomial {
                exp: ExpVec::unit(vars.len(), index),
                coeff: CoeffExpr::one(),
            }],
        )
    }

    pub fn from_monomials(vars: Rc<Vec<Variable>>, monomials: Vec<Monomial>) -> Self {
        Polynomial::canonicalize(vars, monomials)
    }

    pub fn monomials(&self) -> &[Monomial] {
        &self.monomials
    }

    pub fn is_zero(&self) -> bool {
        self.monomials.is_empty()
    }

    /// Coefficient of exponent vector `e`, or the zero `CoeffExpr` if `e`
    /// does not occur — the `findEqualityConstraints` scaffolding in
    /// `polyhorn-witness` relies on this lookup going through `index`.
    pub fn coeff_of(&self, exp: &ExpVec) -> CoeffExpr {
        match self.index.get(exp) {
            Some(&i) => self.monomials[i].coeff.clone(),
            None => CoeffExpr::zero(),
        }
    }

    /// Every exponent vector with a nonzero coefficient.
    pub fn support(&self) -> impl Iterator<Item = &ExpVec> {
        self.monomials.iter().map(|m| &m.exp)
    }

    pub fn degree(&self) -> u32 {
        self.monomials.iter().map(|m| m.exp.degree()).max().unwrap_or(0)
    }

    /// `true` iff every monomial has `|e| ≤ 1` and each nonzero exponent is 1.
    pub fn is_linear(&self) -> bool {
        self.monomials.iter().all(|m| m.exp.is_linear())
    }

    fn canonicalize(vars: Rc<Vec<Variable>>, monomials: Vec<Monomial>) -> Self {
        let mut grouped: BTreeMap<ExpVec, CoeffExpr> = BTreeMap::new();
        for m in monomials {
            let entry = grouped.entry(m.exp).or_insert_with(CoeffExpr::zero);
            *entry = entry.add(&m.coeff);
        }
        let mut monomials = Vec::with_capacity(grouped.len());
        let mut index = HashMap::with_capacity(grouped.len());
        for (exp, coeff) in grouped {
            if coeff.is_zero() {
                continue;
            }
            index.insert(exp.clone(), monomials.len());
            monomials.push(Monomial { exp, coeff });
        }
        Polynomial { vars, monomials, index }
    }

    pub fn neg(&self) -> Self {
        let monomials = self
            .monomials
            .iter()
            .map(|m| Monomial { exp: m.exp.clone(), coeff: m.coeff.neg() })
            .collect();
        Polynomial::canonicalize(self.vars.clone(), monomials)
    }

    /// Requires `self` and `other` to share the same `V` (same variables, in
    /// the same order); every witness generator aligns polynomials onto a
    /// common `V` before combining them.
    pub fn add(&self, other: &Self) -> Self {
        assert_eq!(self.vars, other.vars, "polynomial addition requires a shared variable list");
        let mut monomials = self.monomials.clone();
        monomials.extend(other.monomials.iter().cloned());
        Polynomial::canonicalize(self.vars.clone(), monomials)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        assert_eq!(self.vars, other.vars, "polynomial multiplication requires a shared variable list");
        let mut monomials = Vec::with_capacity(self.monomials.len() * other.monomials.len());
        for a in &self.monomials {
            for b in &other.monomials {
                monomials.push(Monomial {
                    exp: a.exp.add(&b.exp),
                    coeff: a.coeff.mul(&b.coeff),
                });
            }
        }
        Polynomial::canonicalize(self.vars.clone(), monomials)
    }

    pub fn scale(&self, factor: &CoeffExpr) -> Self {
        let monomials = self
            .monomials
            .iter()
            .map(|m| Monomial { exp: m.exp.clone(), coeff: m.coeff.mul(factor) })
            .collect();
        Polynomial::canonicalize(self.vars.clone(), monomials)
    }

    /// Extends `V` with `extra` program variables, padding every existing
    /// monomial's exponent vector with trailing zeros. Used by Putinar's
    /// strict-case witness to introduce the `w` variables.
    pub fn add_program_variables(&self, extra: &[Variable]) -> Self {
        let mut new_vars = (*self.vars).clone();
        new_vars.extend(extra.iter().cloned());
        let new_vars = Rc::new(new_vars);
        let monomials = self
            .monomials
            .iter()
            .map(|m| Monomial { exp: m.exp.extended(extra.len()), coeff: m.coeff.clone() })
            .collect();
        Polynomial::from_monomials(new_vars, monomials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::BigRational as Rational;
    use polyhorn_base::{VariableKind, VariableTable};

    fn rat(n: i64) -> Rational {
        Rational::from_integer(n.into())
    }

    fn setup() -> (Rc<Vec<Variable>>, Variable, Variable) {
        let mut t = VariableTable::new();
        let x = t.intern("x", VariableKind::Program);
        let y = t.intern("y", VariableKind::Program);
        (Rc::new(vec![x.clone(), y.clone()]), x, y)
    }

    #[test]
    fn degree_of_product_sums_degrees() {
        let (vars, _x, _y) = setup();
        let p = Polynomial::variable(vars.clone(), 0);
        let q = Polynomial::variable(vars.clone(), 1);
        let pq = p.mul(&q);
        assert_eq!(pq.degree(), p.degree() + q.degree());
    }

    #[test]
    fn is_linear_matches_degree_and_exponent_shape() {
        let (vars, _x, _y) = setup();
        let p = Polynomial::variable(vars.clone(), 0);
        assert!(p.is_linear());
        let p2 = p.mul(&p);
        assert!(!p2.is_linear());
        assert_eq!(p2.degree(), 2);
    }

    #[test]
    fn addition_is_commutative_and_has_identity() {
        let (vars, _x, _y) = setup();
        let p = Polynomial::variable(vars.clone(), 0);
        let q = Polynomial::constant(vars.clone(), CoeffExpr::from_rational(rat(3)));
        assert_eq!(p.add(&q), q.add(&p));
        assert_eq!(p.add(&Polynomial::zero(vars.clone())), p);
        assert!(p.sub(&p).is_zero());
    }

    #[test]
    fn coeff_of_missing_exponent_is_zero() {
        let (vars, _x, _y) = setup();
        let p = Polynomial::variable(vars.clone(), 0);
        assert!(p.coeff_of(&ExpVec::unit(2, 1)).is_zero());
    }

    #[test]
    fn add_program_variables_pads_with_zero_exponents() {
        let (vars, _x, _y) = setup();
        let p = Polynomial::variable(vars.clone(), 0);
        let mut t = VariableTable::new();
        let w = t.intern("w", VariableKind::Program);
        let extended = p.add_program_variables(&[w]);
        assert_eq!(extended.vars().len(), 3);
        assert_eq!(extended.degree(), 1);
    }
}
