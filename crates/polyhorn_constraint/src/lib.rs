//! Constraints and disjunctive normal form.
//!
//! ```text
//! ┌───────────────────┐     ┌───────────────────┐
//! │   PolyConstraint    │     │  CoeffConstraint    │
//! │  Polynomial ▷ 0      │     │   CoeffExpr ▷ 0      │
//! └──────────┬──────────┘     └──────────┬──────────┘
//!            └──────────────┬───────────┘
//!                            ▼
//!                    ┌──────────────┐
//!                    │  Dnf<C>        │  closed under ∧, ∨, ¬
//!                    └──────────────┘
//! ```
//!
//! `PolyConstraint` carries the universally-quantified hypotheses/goal of a
//! Horn clause; `CoeffConstraint` carries the existential constraints a
//! witness generator emits over template/auxiliary variables. Both share the
//! same `Relation`/negation shape and the same generic [`Dnf`].

mod constraint;
mod dnf;
mod relation;

pub use constraint::{CoeffConstraint, PolyConstraint};
pub use dnf::Dnf;
pub use relation::{RawRelation, Relation};
