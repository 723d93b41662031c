use std::rc::Rc;

use polyhorn_constraint::PolyConstraint;
use polyhorn_base::Variable;

/// A single fully-expanded Horn implication `⋀ᵢ gᵢ ▷ᵢ 0 ⇒ f ▷ 0` — the only
/// shape a witness generator ever has to discharge. `polyhorn-model`
/// produces these from the richer `(LHS: DNF, RHS: DNF)` Horn pair a front
/// end registers, by retaining only the first RHS clause as the positive
/// obligation, folding the rest into the hypotheses, and expanding the
/// Cartesian product of LHS clauses against RHS atoms.
#[derive(Debug, Clone)]
pub struct Implication {
    pub hypotheses: Vec<PolyConstraint>,
    pub goal: PolyConstraint,
    pub program_vars: Rc<Vec<Variable>>,
}

impl Implication {
    pub fn new(hypotheses: Vec<PolyConstraint>, goal: PolyConstraint, program_vars: Rc<Vec<Variable>>) -> Self {
        Implication { hypotheses, goal, program_vars }
    }

    /// `true` iff every hypothesis and the goal are linear polynomials —
    /// the condition under which Farkas applies (§4.3).
    pub fn is_fully_linear(&self) -> bool {
        self.hypotheses.iter().all(|h| h.body().is_linear()) && self.goal.body().is_linear()
    }

    /// `true` iff every hypothesis is linear (the goal may be nonlinear) —
    /// the condition under which Handelman applies.
    pub fn hypotheses_are_linear(&self) -> bool {
        self.hypotheses.iter().all(|h| h.body().is_linear())
    }

    /// The maximum polynomial degree observed across hypotheses and goal,
    /// used by `auto` mode to default the four degree knobs (§4.3).
    pub fn max_degree(&self) -> u32 {
        self.hypotheses
            .iter()
            .map(|h| h.body().degree())
            .chain(std::iter::once(self.goal.body().degree()))
            .max()
            .unwrap_or(0)
    }
}
