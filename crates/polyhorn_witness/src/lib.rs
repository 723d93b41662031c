//! Farkas, Handelman, and Putinar witness generators, the `auto` theorem
//! selector, and the equality-elimination heuristic.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │        Implication         │  one ⋀gᵢ▷ᵢ0 ⇒ f▷0, from polyhorn-model
//! └─────────────┬──────────────┘
//!               ▼
//! ┌──────────────────────────┐
//! │         selector            │  auto: pick Farkas/Handelman/Putinar, default degrees
//! └─────────────┬──────────────┘
//!               ▼
//! ┌─────────┬─────────┬──────────┐
//! │ farkas  │handelman│ putinar  │  SAT ∨ nonstrict-UNSAT ∨ strict-UNSAT per theorem
//! └─────────┴─────────┴──────────┘
//!               ▼
//! ┌──────────────────────────┐
//! │     equality_elim           │  shrink each resulting clause to a fixed point
//! └──────────────────────────┘
//! ```

mod config;
mod equality_elim;
mod error;
mod farkas;
mod handelman;
mod implication;
mod putinar;
mod selector;
mod shared;

pub use config::{Config, SolverName, TheoremName};
pub use equality_elim::eliminate;
pub use error::{WitnessError, WitnessResult};
pub use implication::Implication;
pub use selector::select;

use polyhorn_base::VariableTable;
use polyhorn_constraint::{CoeffConstraint, Dnf};

/// Discharges a single [`Implication`] under `cfg`, resolving `auto` theorem
/// selection and per-implication degree defaulting first, then running
/// equality elimination over every resulting clause.
pub fn generate(vt: &mut VariableTable, cfg: &Config, imp: &Implication) -> WitnessResult<Dnf<CoeffConstraint>> {
    let theorem = selector::select(cfg, imp);
    let local_cfg = selector::degrees_for(cfg, imp);

    let dnf = match theorem {
        TheoremName::Farkas => farkas::generate(vt, &local_cfg, imp)?,
        TheoremName::Handelman => handelman::generate(vt, &local_cfg, imp)?,
        TheoremName::Putinar => putinar::generate(vt, &local_cfg, imp)?,
        TheoremName::Auto => unreachable!("selector::select never returns Auto"),
    };

    let clauses = dnf.into_clauses().into_iter().map(equality_elim::eliminate).collect();
    Ok(Dnf::from_clauses(clauses))
}
