use std::rc::Rc;

use polyhorn_base::{Variable, VariableKind, VariableTable};
use polyhorn_constraint::{CoeffConstraint, Dnf, PolyConstraint};
use polyhorn_witness::Config;

use crate::error::ModelResult;
use crate::horn_pair::HornPair;

/// A free-standing assertion pushed alongside the Horn pairs: either a bare
/// DNF or an implication between two DNFs, printed by the SMT encoder as
/// `(assert (=> a b))` (§4.5).
#[derive(Debug, Clone)]
pub enum Precondition {
    Standalone(Dnf<CoeffConstraint>),
    Implication(Dnf<CoeffConstraint>, Dnf<CoeffConstraint>),
}

/// The stateful builder a front end populates one Horn clause at a time
/// (§6 "Input from the parser"), then compiles into the flat list of
/// `CoeffConstraint` DNFs the SMT encoder consumes.
pub struct PositiveModel {
    vt: VariableTable,
    template_vars: Vec<Variable>,
    pairs: Vec<HornPair>,
    preconditions: Vec<Precondition>,
    directives: Vec<String>,
}

impl Default for PositiveModel {
    fn default() -> Self {
        PositiveModel::new()
    }
}

impl PositiveModel {
    pub fn new() -> Self {
        PositiveModel {
            vt: VariableTable::new(),
            template_vars: Vec::new(),
            pairs: Vec::new(),
            preconditions: Vec::new(),
            directives: Vec::new(),
        }
    }

    /// Declares a template variable by name; it must be declared even if no
    /// registered Horn pair ends up using it, since the SMT encoder declares
    /// every template variable up front.
    pub fn declare_template_variable(&mut self, name: &str) -> Variable {
        let v = self.vt.intern(name, VariableKind::Template);
        self.template_vars.push(v.clone());
        v
    }

    /// Interns a program variable by name (distinct namespace from template
    /// variables by construction — `VariableKind` is part of identity).
    pub fn intern_program_variable(&mut self, name: &str) -> Variable {
        self.vt.intern(name, VariableKind::Program)
    }

    pub fn add_paired_constraint(&mut self, lhs: Dnf<PolyConstraint>, rhs: Dnf<PolyConstraint>, program_vars: Rc<Vec<Variable>>) {
        self.pairs.push(HornPair::new(lhs, rhs, program_vars));
    }

    pub fn add_precondition(&mut self, dnf: Dnf<CoeffConstraint>) {
        self.preconditions.push(Precondition::Standalone(dnf));
    }

    pub fn add_precondition_implication(&mut self, antecedent: Dnf<CoeffConstraint>, consequent: Dnf<CoeffConstraint>) {
        self.preconditions.push(Precondition::Implication(antecedent, consequent));
    }

    pub fn push_directive(&mut self, directive: impl Into<String>) {
        self.directives.push(directive.into());
    }

    pub fn template_vars(&self) -> &[Variable] {
        &self.template_vars
    }

    pub fn preconditions(&self) -> &[Precondition] {
        &self.preconditions
    }

    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    pub fn variable_table_mut(&mut self) -> &mut VariableTable {
        &mut self.vt
    }

    /// Expands every registered Horn pair into its implications, discharges
    /// each via the witness generator `cfg` selects, and ANDs the per-pair
    /// results together — proving a pair requires every one of its expanded
    /// implications to hold. Returns one `Dnf<CoeffConstraint>` per pair, in
    /// registration order, matching the order the encoder must assert them.
    pub fn compile(&mut self, cfg: &Config) -> ModelResult<Vec<Dnf<CoeffConstraint>>> {
        let mut out = Vec::with_capacity(self.pairs.len());
        for pair in self.pairs.clone() {
            let implications = pair.expand()?;
            let mut combined = Dnf::top();
            for imp in &implications {
                let witness = polyhorn_witness::generate(&mut self.vt, cfg, imp)?;
                combined = combined.and(&witness);
            }
            out.push(combined);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_algebra::Polynomial;
    use polyhorn_constraint::RawRelation;
    use polyhorn_witness::TheoremName;

    #[test]
    fn compile_produces_one_dnf_per_registered_pair() {
        let mut model = PositiveModel::new();
        let x = model.intern_program_variable("x");
        let vars = Rc::new(vec![x]);
        let p = Polynomial::variable(vars.clone(), 0);
        let lhs = Dnf::from_atom(PolyConstraint::new(p.clone(), RawRelation::Ge));
        let rhs = Dnf::from_atom(PolyConstraint::new(p, RawRelation::Ge));
        model.add_paired_constraint(lhs, rhs, vars);

        let cfg = Config::new(TheoremName::Auto);
        let compiled = model.compile(&cfg).unwrap();
        assert_eq!(compiled.len(), 1);
    }

    #[test]
    fn declared_template_variables_are_tracked() {
        let mut model = PositiveModel::new();
        model.declare_template_variable("a");
        model.declare_template_variable("b");
        assert_eq!(model.template_vars().len(), 2);
    }
}
