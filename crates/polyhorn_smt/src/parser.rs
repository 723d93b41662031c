//! Parses a solver's stdout into `(status, model)` (§4.6).

use std::collections::{HashMap, HashSet};

use polyhorn_base::Variable;

use crate::error::{SmtError, SmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Sat,
    Unsat,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
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

/// Groups a flat token stream into nested s-expressions. Solver output is
/// trusted local subprocess text, so an unbalanced close paren just pops the
/// top of an otherwise-empty stack rather than erroring.
fn parse_sexprs(tokens: &[String]) -> Vec<SExpr> {
    let mut stack: Vec<Vec<SExpr>> = vec![Vec::new()];
    for tok in tokens {
        match tok.as_str() {
            "(" => stack.push(Vec::new()),
            ")" => {
                let finished = stack.pop().unwrap_or_default();
                match stack.last_mut() {
                    Some(top) => top.push(SExpr::List(finished)),
                    None => stack.push(vec![SExpr::List(finished)]),
                }
            }
            atom => {
                if let Some(top) = stack.last_mut() {
                    top.push(SExpr::Atom(atom.to_string()));
                }
            }
        }
    }
    stack.into_iter().next().unwrap_or_default()
}

fn sexpr_to_string(e: &SExpr) -> String {
    match e {
        SExpr::Atom(a) => a.clone(),
        SExpr::List(items) => format!("({})", items.iter().map(sexpr_to_string).collect::<Vec<_>>().join(" ")),
    }
}

fn collect_bindings(exprs: &[SExpr], known: &HashSet<&str>, model: &mut HashMap<String, String>) {
    for e in exprs {
        match e {
            SExpr::List(items) if items.len() == 2 => {
                if let SExpr::Atom(name) = &items[0] {
                    if known.contains(name.as_str()) {
                        model.insert(name.clone(), sexpr_to_string(&items[1]));
                        continue;
                    }
                }
                collect_bindings(items, known, model);
            }
            SExpr::List(items) => collect_bindings(items, known, model),
            SExpr::Atom(_) => {}
        }
    }
}

/// The first non-empty, non-`unsupported` line decides the status; on `sat`
/// the rest of stdout is scanned for `(name value)` pairs whose `name`
/// matches a declared template variable (§7(d): anything else is silently
/// ignored, not an error).
pub fn parse_result(stdout: &str, template_vars: &[Variable]) -> SmtResult<(Status, HashMap<String, String>)> {
    let (status, rest) = read_status(stdout)?;
    if status != Status::Sat {
        return Ok((status, HashMap::new()));
    }

    let tokens = tokenize(&rest);
    let top = parse_sexprs(&tokens);

    let known: HashSet<&str> = template_vars.iter().map(Variable::name).collect();
    let mut model = HashMap::new();
    collect_bindings(&top, &known, &mut model);

    Ok((Status::Sat, model))
}

/// Reads just the status line (skipping any leading `unsupported` lines) and
/// returns it along with the unparsed remainder, joined back into one
/// string. Shared by `parse_result` and the unsat-core narrowing loop in
/// `polyhorn-solver`, which reads an `(get-unsat-core)` list rather than a
/// model.
pub fn read_status(stdout: &str) -> SmtResult<(Status, String)> {
    let mut lines = stdout.lines().map(str::trim).filter(|l| !l.is_empty());

    let mut status_line = None;
    for line in &mut lines {
        if line == "unsupported" {
            continue;
        }
        status_line = Some(line);
        break;
    }
    let status_line = status_line.ok_or(SmtError::MissingStatus)?;

    let status = match status_line {
        "sat" => Status::Sat,
        "unsat" => Status::Unsat,
        "unknown" => Status::Unknown,
        other => return Err(SmtError::UnrecognizedStatus(other.to_string())),
    };

    let rest: String = lines.collect::<Vec<_>>().join(" ");
    Ok((status, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_base::{VariableKind, VariableTable};

    fn template_vars() -> (VariableTable, Vec<Variable>) {
        let mut vt = VariableTable::new();
        let a = vt.intern("a", VariableKind::Template);
        let b = vt.intern("b", VariableKind::Template);
        (vt, vec![a, b])
    }

    #[test]
    fn unsupported_status_lines_are_skipped() {
        let (_vt, vars) = template_vars();
        let (status, model) = parse_result("unsupported\nsat\n((a 1.0) (b (/ 3 2)))", &vars).unwrap();
        assert_eq!(status, Status::Sat);
        assert_eq!(model.get("a").unwrap(), "1.0");
        assert_eq!(model.get("b").unwrap(), "(/ 3 2)");
    }

    #[test]
    fn unsat_carries_an_empty_model() {
        let (_vt, vars) = template_vars();
        let (status, model) = parse_result("unsat", &vars).unwrap();
        assert_eq!(status, Status::Unsat);
        assert!(model.is_empty());
    }

    #[test]
    fn bindings_for_unknown_names_are_dropped() {
        let (_vt, vars) = template_vars();
        let (_status, model) = parse_result("sat\n((a 1.0) (zzz 2.0))", &vars).unwrap();
        assert!(model.contains_key("a"));
        assert!(!model.contains_key("zzz"));
    }

    #[test]
    fn unrecognized_status_is_an_error() {
        let (_vt, vars) = template_vars();
        let err = parse_result("banana", &vars).unwrap_err();
        assert_eq!(err, SmtError::UnrecognizedStatus("banana".to_string()));
    }

    #[test]
    fn all_empty_input_is_missing_status() {
        let (_vt, vars) = template_vars();
        let err = parse_result("\n\n", &vars).unwrap_err();
        assert_eq!(err, SmtError::MissingStatus);
    }
}
