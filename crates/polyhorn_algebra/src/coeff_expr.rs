use std::collections::BTreeMap;

use num_traits::Zero;
use polyhorn_base::{Rational, Variable};

use crate::multiset::Multiset;

/// A single `(rational, multiset)` addend of a [`CoeffExpr`], denoting
/// `q · ∏ vars`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub coeff: Rational,
    pub vars: Multiset,
}

impl Term {
    pub fn new(coeff: Rational, vars: Multiset) -> Self {
        Term { coeff, vars }
    }

    pub fn constant(coeff: Rational) -> Self {
        Term::new(coeff, Multiset::empty())
    }
}

/// The ring of coefficient expressions: polynomials in the template and
/// auxiliary variables, with exact rational coefficients.
///
/// A `CoeffExpr` is always stored canonicalized: terms sorted by
/// `(multiset size, lexicographic expansion, rational)`, at most one term per
/// distinct multiset (combined by summing), zero terms dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoeffExpr {
    terms: Vec<Term>,
}

impl CoeffExpr {
    /// The additive identity.
    pub fn zero() -> Self {
        CoeffExpr { terms: Vec::new() }
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        CoeffExpr::from_rational(Rational::from_integer(1.into()))
    }

    pub fn from_rational(q: Rational) -> Self {
        CoeffExpr::canonicalize(vec![Term::constant(q)])
    }

    pub fn from_variable(var: Variable) -> Self {
        CoeffExpr::canonicalize(vec![Term::new(
            Rational::from_integer(1.into()),
            Multiset::single(var),
        )])
    }

    pub fn from_terms(terms: Vec<Term>) -> Self {
        CoeffExpr::canonicalize(terms)
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    fn canonicalize(terms: Vec<Term>) -> Self {
        // Group by multiset, summing coefficients. A `BTreeMap` keyed on the
        // multiset itself gives us grouping and the size/lex portion of the
        // ordering for free; ties within identical multisets cannot occur
        // after grouping since each key is unique.
        let mut grouped: BTreeMap<Multiset, Rational> = BTreeMap::new();
        for term in terms {
            let entry = grouped
                .entry(term.vars)
                .or_insert_with(|| Rational::zero());
            *entry += term.coeff;
        }
        let terms = grouped
            .into_iter()
            .filter(|(_, q)| !q.is_zero())
            .map(|(vars, coeff)| Term::new(coeff, vars))
            .collect();
        CoeffExpr { terms }
    }

    pub fn neg(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|t| Term::new(-t.coeff.clone(), t.vars.clone()))
            .collect();
        CoeffExpr { terms }
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        CoeffExpr::canonicalize(terms)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Cartesian-product multiplication: every term of `self` against every
    /// term of `other`, multisets merged and rationals multiplied.
    pub fn mul(&self, other: &Self) -> Self {
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                terms.push(Term::new(
                    a.coeff.clone() * b.coeff.clone(),
                    a.vars.merge(&b.vars),
                ));
            }
        }
        CoeffExpr::canonicalize(terms)
    }

    pub fn scale(&self, factor: &Rational) -> Self {
        if factor.is_zero() {
            return CoeffExpr::zero();
        }
        let terms = self
            .terms
            .iter()
            .map(|t| Term::new(t.coeff.clone() * factor.clone(), t.vars.clone()))
            .collect();
        CoeffExpr { terms }
    }

    /// Classifies this expression as an *equality-of-variable-to-constant*:
    /// exactly one distinct variable occurs (with exponent 1) across at most
    /// two terms, the other term (if any) being a bare constant. Returns the
    /// variable together with the constant it is forced to equal.
    ///
    /// Used by the sign of the enclosing `CoeffConstraint` (`=`); this
    /// function only inspects the shape of the expression itself.
    pub fn as_variable_definition(&self) -> Option<(Variable, Rational)> {
        match self.terms.as_slice() {
            [] => None,
            [single] => {
                let (var, exp) = single_variable_with_unit_power(&single.vars)?;
                let _ = exp;
                if single.coeff.is_zero() {
                    None
                } else {
                    Some((var, Rational::zero()))
                }
            }
            [t1, t2] => {
                let (var_term, const_term) = match (
                    single_variable_with_unit_power(&t1.vars),
                    t2.vars.is_empty(),
                ) {
                    (Some(_), true) => (t1, t2),
                    _ => match (
                        single_variable_with_unit_power(&t2.vars),
                        t1.vars.is_empty(),
                    ) {
                        (Some(_), true) => (t2, t1),
                        _ => return None,
                    },
                };
                let var = single_variable_with_unit_power(&var_term.vars)?.0;
                let value = if const_term.coeff.is_zero() {
                    Rational::zero()
                } else {
                    -const_term.coeff.clone() / var_term.coeff.clone()
                };
                Some((var, value))
            }
            _ => None,
        }
    }

    /// Substitutes `var ↦ value` into every term, rebuilding (never mutating
    /// in place) each affected term and recanonicalizing the result.
    pub fn substitute(&self, var: &Variable, value: &Rational) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|t| {
                let power = t.vars.power_of(var);
                if power == 0 {
                    t.clone()
                } else {
                    let factor = pow_rational(value, power);
                    Term::new(t.coeff.clone() * factor, t.vars.without(var))
                }
            })
            .collect();
        CoeffExpr::canonicalize(terms)
    }
}

fn single_variable_with_unit_power(vars: &Multiset) -> Option<(Variable, u32)> {
    if vars.distinct_count() != 1 {
        return None;
    }
    let (var, power) = vars.iter().next().expect("distinct_count checked above");
    if power == 1 {
        Some((var.clone(), power))
    } else {
        None
    }
}

fn pow_rational(base: &Rational, exp: u32) -> Rational {
    let mut result = Rational::from_integer(1.into());
    for _ in 0..exp {
        result *= base.clone();
    }
    result
}
