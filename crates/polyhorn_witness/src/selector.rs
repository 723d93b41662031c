//! `auto` theorem selection (§4.3): inspect a single implication's linearity
//! shape and pick the cheapest theorem that can discharge it, rather than
//! running the expensive Putinar construction on every implication in a
//! model just because one of them needed it.

use crate::config::{Config, TheoremName};
use crate::implication::Implication;

/// Resolves `Config::theorem_name` for a specific implication: `Auto` is
/// replaced by the cheapest applicable theorem, anything else passes through
/// unchanged (every implication in a non-`auto` run is discharged by the
/// theorem the caller named, whether or not it is the cheapest choice).
pub fn select(cfg: &Config, imp: &Implication) -> TheoremName {
    match cfg.theorem_name {
        TheoremName::Auto => {
            if imp.is_fully_linear() {
                TheoremName::Farkas
            } else if imp.hypotheses_are_linear() {
                TheoremName::Handelman
            } else {
                TheoremName::Putinar
            }
        }
        other => other,
    }
}

/// In `auto` mode every degree knob defaults to the highest polynomial
/// degree observed in the implication, rather than the run-wide default of
/// zero — a degree-0 template could never match a degree-2 hypothesis.
/// Returns a new `Config` local to this implication; the caller's shared
/// `Config` is never mutated (§9).
pub fn degrees_for(cfg: &Config, imp: &Implication) -> Config {
    if cfg.theorem_name != TheoremName::Auto {
        return cfg.clone();
    }
    let d = imp.max_degree();
    Config {
        degree_of_sat: d,
        degree_of_nonstrict_unsat: d,
        degree_of_strict_unsat: d,
        max_d_of_strict: d,
        ..cfg.clone()
    }
}
