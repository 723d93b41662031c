//! Deserializes the minimal TOML model description §6 describes into a
//! `PositiveModel` plus the `Config` it is discharged under.

use std::rc::Rc;

use serde::Deserialize;

use polyhorn_base::Variable;
use polyhorn_constraint::{CoeffConstraint, Dnf, PolyConstraint, RawRelation};
use polyhorn_model::PositiveModel;
use polyhorn_witness::Config;

use crate::error::{CliError, CliResult};
use crate::poly_expr::{parse_coeff_expr, parse_polynomial};

#[derive(Debug, Deserialize)]
pub struct ModelFile {
    #[serde(default)]
    template_vars: Vec<String>,
    #[serde(default)]
    directives: Vec<String>,
    #[serde(default)]
    precondition: Vec<PreconditionSpec>,
    #[serde(default)]
    pair: Vec<PairSpec>,
    config: ConfigSpec,
}

#[derive(Debug, Deserialize)]
struct AtomSpec {
    body: String,
    relation: String,
}

#[derive(Debug, Deserialize)]
struct PairSpec {
    program_vars: Vec<String>,
    lhs: Vec<Vec<AtomSpec>>,
    rhs: Vec<Vec<AtomSpec>>,
}

#[derive(Debug, Deserialize)]
struct PreconditionSpec {
    antecedent: Option<Vec<AtomSpec>>,
    consequent: Vec<AtomSpec>,
}

#[derive(Debug, Deserialize)]
struct ConfigSpec {
    theorem_name: String,
    #[serde(default)]
    degree_of_sat: i64,
    #[serde(default)]
    degree_of_nonstrict_unsat: i64,
    #[serde(default)]
    degree_of_strict_unsat: i64,
    #[serde(default)]
    max_d_of_strict: i64,
    #[serde(default)]
    sat_heuristic: bool,
    #[serde(default)]
    unsat_core_heuristic: bool,
    #[serde(default)]
    integer_arithmetic: bool,
    #[serde(default = "default_solver_name")]
    solver_name: String,
    #[serde(default)]
    output_path: String,
}

fn default_solver_name() -> String {
    "default".to_string()
}

fn raw_relation(name: &str) -> CliResult<RawRelation> {
    match name {
        "lt" => Ok(RawRelation::Lt),
        "le" => Ok(RawRelation::Le),
        "gt" => Ok(RawRelation::Gt),
        "ge" => Ok(RawRelation::Ge),
        "eq" => Ok(RawRelation::Eq),
        "ne" => Ok(RawRelation::Ne),
        other => Err(CliError::Model(format!("unknown relation {other:?}"))),
    }
}

fn build_poly_clause(atoms: &[AtomSpec], vars: &Rc<Vec<Variable>>) -> CliResult<Vec<PolyConstraint>> {
    atoms
        .iter()
        .map(|a| {
            let body = parse_polynomial(&a.body, vars)?;
            Ok(PolyConstraint::new(body, raw_relation(&a.relation)?))
        })
        .collect()
}

fn build_coeff_clause(atoms: &[AtomSpec], vars: &[Variable]) -> CliResult<Vec<CoeffConstraint>> {
    atoms
        .iter()
        .map(|a| {
            let body = parse_coeff_expr(&a.body, vars)?;
            Ok(CoeffConstraint::new(body, raw_relation(&a.relation)?))
        })
        .collect()
}

/// Parses `toml_src` and returns the populated model alongside the `Config`
/// it should be compiled under.
pub fn load(toml_src: &str) -> CliResult<(PositiveModel, Config)> {
    let file: ModelFile = toml::from_str(toml_src)?;

    let mut model = PositiveModel::new();
    for name in &file.template_vars {
        model.declare_template_variable(name);
    }

    for pair in &file.pair {
        let vars = Rc::new(pair.program_vars.iter().map(|n| model.intern_program_variable(n)).collect::<Vec<_>>());

        let lhs_clauses = pair.lhs.iter().map(|c| build_poly_clause(c, &vars)).collect::<CliResult<Vec<_>>>()?;
        let rhs_clauses = pair.rhs.iter().map(|c| build_poly_clause(c, &vars)).collect::<CliResult<Vec<_>>>()?;

        model.add_paired_constraint(Dnf::from_clauses(lhs_clauses), Dnf::from_clauses(rhs_clauses), vars);
    }

    let template_vars = model.template_vars().to_vec();
    for p in &file.precondition {
        let consequent = Dnf::from_clause(build_coeff_clause(&p.consequent, &template_vars)?);
        match &p.antecedent {
            Some(atoms) => {
                let antecedent = Dnf::from_clause(build_coeff_clause(atoms, &template_vars)?);
                model.add_precondition_implication(antecedent, consequent);
            }
            None => model.add_precondition(consequent),
        }
    }

    for directive in &file.directives {
        model.push_directive(directive.clone());
    }

    let cfg = Config::try_from_raw(
        &file.config.theorem_name,
        file.config.degree_of_sat,
        file.config.degree_of_nonstrict_unsat,
        file.config.degree_of_strict_unsat,
        file.config.max_d_of_strict,
        file.config.sat_heuristic,
        file.config.unsat_core_heuristic,
        file.config.integer_arithmetic,
        &file.config.solver_name,
        file.config.output_path.clone(),
    )?;

    Ok((model, cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        template_vars = ["a"]

        [config]
        theorem_name = "auto"

        [[pair]]
        program_vars = ["x"]
        lhs = [[ { body = "x", relation = "ge" } ]]
        rhs = [[ { body = "x", relation = "ge" } ]]
    "#;

    #[test]
    fn loads_a_minimal_model() {
        let (mut model, cfg) = load(SAMPLE).unwrap();
        assert_eq!(model.template_vars().len(), 1);
        let compiled = model.compile(&cfg).unwrap();
        assert_eq!(compiled.len(), 1);
    }

    #[test]
    fn unknown_relation_is_rejected() {
        let src = SAMPLE.replace("\"ge\"", "\"bogus\"");
        assert!(load(&src).is_err());
    }
}
