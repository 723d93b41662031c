use num_bigint::BigInt;
use num_traits::Signed;
use polyhorn_base::Rational;

use crate::coeff_expr::{CoeffExpr, Term};
use crate::polynomial::{Monomial, Polynomial};

/// Emits the SMT-LIB2 prefix-form string for a value, per §4.1's preorder
/// printing rules: rationals as `n` or `(/ n d)` (wrapped in `(- …)` if
/// negative), an empty sum as `0`, a lone term/monomial printed inline, and
/// `(+ 0 …)` wrapping otherwise so associativity stays explicit.
pub trait ToSmt {
    fn to_smt(&self) -> String;
}

fn rational_to_smt(q: &Rational) -> String {
    let negative = q.is_negative();
    let abs = if negative { -q.clone() } else { q.clone() };
    let body = if abs.denom() == &BigInt::from(1) {
        format!("{}", abs.numer())
    } else {
        format!("(/ {} {})", abs.numer(), abs.denom())
    };
    if negative {
        format!("(- {})", body)
    } else {
        body
    }
}

fn term_to_smt(term: &Term) -> String {
    let coeff = rational_to_smt(&term.coeff);
    if term.vars.is_empty() {
        return coeff;
    }
    let mut parts = vec!["1".to_string(), coeff];
    for v in term.vars.expand_sorted() {
        parts.push(v.name().to_string());
    }
    format!("(* {})", parts.join(" "))
}

impl ToSmt for CoeffExpr {
    fn to_smt(&self) -> String {
        match self.terms() {
            [] => "0".to_string(),
            [single] => term_to_smt(single),
            terms => {
                let rendered: Vec<String> = terms.iter().map(term_to_smt).collect();
                format!("(+ 0 {})", rendered.join(" "))
            }
        }
    }
}

fn monomial_to_smt(vars: &[polyhorn_base::Variable], m: &Monomial) -> String {
    let coeff = m.coeff.to_smt();
    if m.exp.is_zero() {
        return coeff;
    }
    let mut parts = vec!["1".to_string(), coeff];
    for (var, &power) in vars.iter().zip(m.exp.as_slice()) {
        for _ in 0..power {
            parts.push(var.name().to_string());
        }
    }
    format!("(* {})", parts.join(" "))
}

impl ToSmt for Polynomial {
    fn to_smt(&self) -> String {
        match self.monomials() {
            [] => "0".to_string(),
            [single] => monomial_to_smt(self.vars(), single),
            monomials => {
                let rendered: Vec<String> = monomials
                    .iter()
                    .map(|m| monomial_to_smt(self.vars(), m))
                    .collect();
                format!("(+ 0 {})", rendered.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_base::{VariableKind, VariableTable};
    use std::rc::Rc;

    #[test]
    fn zero_coeff_expr_prints_as_zero() {
        assert_eq!(CoeffExpr::zero().to_smt(), "0");
    }

    #[test]
    fn single_term_prints_inline() {
        let mut t = VariableTable::new();
        let a = t.intern("a", VariableKind::Template);
        let expr = CoeffExpr::from_variable(a);
        assert_eq!(expr.to_smt(), "(* 1 1 a)");
    }

    #[test]
    fn multi_term_wraps_in_plus_zero() {
        let mut t = VariableTable::new();
        let a = t.intern("a", VariableKind::Template);
        let expr = CoeffExpr::from_variable(a).add(&CoeffExpr::from_rational(
            polyhorn_base::Rational::from_integer((-3).into()),
        ));
        assert!(expr.to_smt().starts_with("(+ 0 "));
    }

    #[test]
    fn negative_rational_wraps_in_minus() {
        let q = polyhorn_base::Rational::new((-3).into(), 2.into());
        assert_eq!(rational_to_smt(&q), "(- (/ 3 2))");
    }

    #[test]
    fn zero_polynomial_prints_as_zero() {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        let vars = Rc::new(vec![x]);
        assert_eq!(Polynomial::zero(vars).to_smt(), "0");
    }
}
