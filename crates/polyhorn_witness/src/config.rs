use crate::error::{WitnessError, WitnessResult};

/// Which theorem to use to discharge a Horn implication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TheoremName {
    Farkas,
    Handelman,
    Putinar,
    /// Inspect each implication and pick the cheapest theorem that applies
    /// (§4.3): Farkas if everything is linear, Handelman if only the goal is
    /// nonlinear, Putinar otherwise.
    Auto,
}

impl TheoremName {
    pub fn parse(s: &str) -> WitnessResult<Self> {
        match s {
            "farkas" => Ok(TheoremName::Farkas),
            "handelman" => Ok(TheoremName::Handelman),
            "putinar" => Ok(TheoremName::Putinar),
            "auto" => Ok(TheoremName::Auto),
            other => Err(WitnessError::UnknownTheorem(other.to_string())),
        }
    }
}

/// Which SMT solver to target when emitting the script / invoking a binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverName {
    Z3,
    MathSat,
    Default,
}

impl SolverName {
    pub fn parse(s: &str) -> WitnessResult<Self> {
        match s {
            "z3" => Ok(SolverName::Z3),
            "mathsat" => Ok(SolverName::MathSat),
            "default" => Ok(SolverName::Default),
            other => Err(WitnessError::UnknownSolver(other.to_string())),
        }
    }

    pub fn binary_name(self) -> &'static str {
        match self {
            SolverName::Z3 => "z3",
            SolverName::MathSat => "mathsat",
            SolverName::Default => "z3",
        }
    }
}

/// The run-wide configuration record (§6). Every field except `theorem_name`
/// defaults to the zero/false value for its type. Construction is validated:
/// a `Config` can only exist with nonnegative degrees, so downstream code
/// never has to re-check them.
#[derive(Debug, Clone)]
pub struct Config {
    pub theorem_name: TheoremName,
    pub degree_of_sat: u32,
    pub degree_of_nonstrict_unsat: u32,
    pub degree_of_strict_unsat: u32,
    pub max_d_of_strict: u32,
    pub sat_heuristic: bool,
    pub unsat_core_heuristic: bool,
    pub integer_arithmetic: bool,
    pub solver_name: SolverName,
    pub output_path: String,
}

impl Config {
    pub fn new(theorem_name: TheoremName) -> Self {
        Config {
            theorem_name,
            degree_of_sat: 0,
            degree_of_nonstrict_unsat: 0,
            degree_of_strict_unsat: 0,
            max_d_of_strict: 0,
            sat_heuristic: false,
            unsat_core_heuristic: false,
            integer_arithmetic: false,
            solver_name: SolverName::Default,
            output_path: String::new(),
        }
    }

    /// Builds a `Config` from possibly-negative raw degree inputs (as they
    /// would arrive from a TOML/JSON front end), failing fast per §7(c)
    /// rather than silently truncating a negative degree to zero.
    pub fn try_from_raw(
        theorem_name: &str,
        degree_of_sat: i64,
        degree_of_nonstrict_unsat: i64,
        degree_of_strict_unsat: i64,
        max_d_of_strict: i64,
        sat_heuristic: bool,
        unsat_core_heuristic: bool,
        integer_arithmetic: bool,
        solver_name: &str,
        output_path: String,
    ) -> WitnessResult<Self> {
        let theorem_name = TheoremName::parse(theorem_name)?;
        let solver_name = SolverName::parse(solver_name)?;
        let degree_of_sat = nonneg("degree_of_sat", degree_of_sat)?;
        let degree_of_nonstrict_unsat = nonneg("degree_of_nonstrict_unsat", degree_of_nonstrict_unsat)?;
        let degree_of_strict_unsat = nonneg("degree_of_strict_unsat", degree_of_strict_unsat)?;
        let max_d_of_strict = nonneg("max_d_of_strict", max_d_of_strict)?;
        Ok(Config {
            theorem_name,
            degree_of_sat,
            degree_of_nonstrict_unsat,
            degree_of_strict_unsat,
            max_d_of_strict,
            sat_heuristic,
            unsat_core_heuristic,
            integer_arithmetic,
            solver_name,
            output_path,
        })
    }
}

fn nonneg(field: &'static str, value: i64) -> WitnessResult<u32> {
    u32::try_from(value).map_err(|_| WitnessError::NegativeDegree { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theorem_name_is_rejected() {
        let err = TheoremName::parse("bogus").unwrap_err();
        assert_eq!(err, WitnessError::UnknownTheorem("bogus".to_string()));
    }

    #[test]
    fn unknown_solver_name_is_rejected() {
        let err = SolverName::parse("bogus").unwrap_err();
        assert_eq!(err, WitnessError::UnknownSolver("bogus".to_string()));
    }

    #[test]
    fn negative_degree_is_rejected() {
        let err = Config::try_from_raw("farkas", -1, 0, 0, 0, true, false, false, "z3", String::new())
            .unwrap_err();
        assert_eq!(
            err,
            WitnessError::NegativeDegree { field: "degree_of_sat", value: -1 }
        );
    }

    #[test]
    fn defaults_are_zero_or_false_except_theorem_name() {
        let cfg = Config::new(TheoremName::Farkas);
        assert_eq!(cfg.degree_of_sat, 0);
        assert!(!cfg.sat_heuristic);
        assert!(!cfg.unsat_core_heuristic);
    }
}
