//! Parses the prefix-notation polynomial fragments a TOML model file embeds
//! (the inverse of `polyhorn_algebra::ToSmt`): `(+ x (* 2 y))`,
//! `(- (/ 3 2))`, bare variable names, bare integer literals.

use std::rc::Rc;

use num_bigint::BigInt;

use polyhorn_algebra::{CoeffExpr, Polynomial};
use polyhorn_base::{Rational, Variable};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone)]
enum Sexpr {
    Atom(String),
    List(Vec<Sexpr>),
}

fn tokenize(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            '(' | ')' => {
                tokens.push(c.to_string());
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            _ => {
                let mut tok = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '(' || c == ')' || c.is_whitespace() {
                        break;
                    }
                    tok.push(c);
                    chars.next();
                }
                tokens.push(tok);
            }
        }
    }
    tokens
}

fn parse_sexprs(tokens: &[String]) -> Vec<Sexpr> {
    let mut stack: Vec<Vec<Sexpr>> = vec![Vec::new()];
    for tok in tokens {
        match tok.as_str() {
            "(" => stack.push(Vec::new()),
            ")" => {
                let finished = stack.pop().unwrap_or_default();
                match stack.last_mut() {
                    Some(top) => top.push(Sexpr::List(finished)),
                    None => stack.push(vec![Sexpr::List(finished)]),
                }
            }
            atom => {
                if let Some(top) = stack.last_mut() {
                    top.push(Sexpr::Atom(atom.to_string()));
                }
            }
        }
    }
    stack.into_iter().next().unwrap_or_default()
}

fn parse_one(src: &str) -> CliResult<Sexpr> {
    let tokens = tokenize(src);
    let top = parse_sexprs(&tokens);
    top.into_iter()
        .next()
        .ok_or_else(|| CliError::Model(format!("empty expression: {src:?}")))
}

fn literal_rational(a: &str) -> Option<Rational> {
    a.parse::<i64>().ok().map(|n| Rational::from_integer(BigInt::from(n)))
}

/// Parses `src` as a polynomial over `vars` (program variables).
pub fn parse_polynomial(src: &str, vars: &Rc<Vec<Variable>>) -> CliResult<Polynomial> {
    eval_poly(&parse_one(src)?, vars)
}

fn eval_poly(e: &Sexpr, vars: &Rc<Vec<Variable>>) -> CliResult<Polynomial> {
    match e {
        Sexpr::Atom(a) => {
            if let Some(q) = literal_rational(a) {
                return Ok(Polynomial::constant(vars.clone(), CoeffExpr::from_rational(q)));
            }
            match vars.iter().position(|v| v.name() == a) {
                Some(idx) => Ok(Polynomial::variable(vars.clone(), idx)),
                None => Err(CliError::Model(format!("undeclared program variable {a:?}"))),
            }
        }
        Sexpr::List(items) => {
            let (op, rest) = items
                .split_first()
                .ok_or_else(|| CliError::Model("empty s-expression".to_string()))?;
            let op = match op {
                Sexpr::Atom(s) => s.as_str(),
                Sexpr::List(_) => return Err(CliError::Model("expected an operator symbol".to_string())),
            };

            if op == "/" {
                return eval_poly_literal_ratio(rest, vars);
            }

            let operands = rest.iter().map(|r| eval_poly(r, vars)).collect::<CliResult<Vec<_>>>()?;
            match op {
                "+" => Ok(operands.into_iter().fold(Polynomial::zero(vars.clone()), |acc, p| acc.add(&p))),
                "*" => Ok(operands
                    .into_iter()
                    .fold(Polynomial::constant(vars.clone(), CoeffExpr::one()), |acc, p| acc.mul(&p))),
                "-" => match operands.as_slice() {
                    [single] => Ok(single.neg()),
                    [first, rest @ ..] => Ok(rest.iter().fold(first.clone(), |acc, p| acc.sub(p))),
                    [] => Err(CliError::Model("'-' needs at least one operand".to_string())),
                },
                other => Err(CliError::Model(format!("unknown polynomial operator {other:?}"))),
            }
        }
    }
}

fn eval_poly_literal_ratio(rest: &[Sexpr], vars: &Rc<Vec<Variable>>) -> CliResult<Polynomial> {
    match rest {
        [Sexpr::Atom(n), Sexpr::Atom(d)] => {
            let n: i64 = n.parse().map_err(|_| CliError::Model(format!("bad numerator {n:?}")))?;
            let d: i64 = d.parse().map_err(|_| CliError::Model(format!("bad denominator {d:?}")))?;
            let q = Rational::new(BigInt::from(n), BigInt::from(d));
            Ok(Polynomial::constant(vars.clone(), CoeffExpr::from_rational(q)))
        }
        _ => Err(CliError::Model("'/' expects exactly two integer literals".to_string())),
    }
}

/// Parses `src` as a coefficient expression over `vars` (template/auxiliary
/// variables), for free-standing precondition bodies.
pub fn parse_coeff_expr(src: &str, vars: &[Variable]) -> CliResult<CoeffExpr> {
    eval_coeff(&parse_one(src)?, vars)
}

fn eval_coeff(e: &Sexpr, vars: &[Variable]) -> CliResult<CoeffExpr> {
    match e {
        Sexpr::Atom(a) => {
            if let Some(q) = literal_rational(a) {
                return Ok(CoeffExpr::from_rational(q));
            }
            match vars.iter().find(|v| v.name() == a) {
                Some(v) => Ok(CoeffExpr::from_variable(v.clone())),
                None => Err(CliError::Model(format!("undeclared template variable {a:?}"))),
            }
        }
        Sexpr::List(items) => {
            let (op, rest) = items
                .split_first()
                .ok_or_else(|| CliError::Model("empty s-expression".to_string()))?;
            let op = match op {
                Sexpr::Atom(s) => s.as_str(),
                Sexpr::List(_) => return Err(CliError::Model("expected an operator symbol".to_string())),
            };

            if op == "/" {
                return match rest {
                    [Sexpr::Atom(n), Sexpr::Atom(d)] => {
                        let n: i64 = n.parse().map_err(|_| CliError::Model(format!("bad numerator {n:?}")))?;
                        let d: i64 = d.parse().map_err(|_| CliError::Model(format!("bad denominator {d:?}")))?;
                        Ok(CoeffExpr::from_rational(Rational::new(BigInt::from(n), BigInt::from(d))))
                    }
                    _ => Err(CliError::Model("'/' expects exactly two integer literals".to_string())),
                };
            }

            let operands = rest.iter().map(|r| eval_coeff(r, vars)).collect::<CliResult<Vec<_>>>()?;
            match op {
                "+" => Ok(operands.into_iter().fold(CoeffExpr::zero(), |acc, p| acc.add(&p))),
                "*" => Ok(operands.into_iter().fold(CoeffExpr::one(), |acc, p| acc.mul(&p))),
                "-" => match operands.as_slice() {
                    [single] => Ok(single.neg()),
                    [first, rest @ ..] => Ok(rest.iter().fold(first.clone(), |acc, p| acc.sub(p))),
                    [] => Err(CliError::Model("'-' needs at least one operand".to_string())),
                },
                other => Err(CliError::Model(format!("unknown coefficient operator {other:?}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_base::{VariableKind, VariableTable};

    #[test]
    fn parses_a_sum_of_a_variable_and_a_literal() {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        let vars = Rc::new(vec![x.clone()]);
        let p = parse_polynomial("(+ x 1)", &vars).unwrap();
        let expected = Polynomial::variable(vars.clone(), 0).add(&Polynomial::constant(vars, CoeffExpr::one()));
        assert_eq!(p, expected);
    }

    #[test]
    fn parses_a_rational_literal() {
        let mut vt = VariableTable::new();
        let x = vt.intern("x", VariableKind::Program);
        let vars = Rc::new(vec![x]);
        let p = parse_polynomial("(/ 3 2)", &vars).unwrap();
        assert_eq!(p, Polynomial::constant(vars, CoeffExpr::from_rational(Rational::new(BigInt::from(3), BigInt::from(2)))));
    }

    #[test]
    fn undeclared_variable_is_an_error() {
        let vt_vars: Rc<Vec<Variable>> = Rc::new(Vec::new());
        assert!(parse_polynomial("y", &vt_vars).is_err());
    }

    #[test]
    fn coeff_expr_parses_a_product_of_template_variables() {
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let b = vt.intern("b", VariableKind::Template);
        let c = parse_coeff_expr("(* a b)", &[a.clone(), b.clone()]).unwrap();
        assert_eq!(c, CoeffExpr::from_variable(a).mul(&CoeffExpr::from_variable(b)));
    }
}
