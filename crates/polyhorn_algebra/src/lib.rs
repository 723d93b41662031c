//! The ring of coefficient expressions and the polynomials built over it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │        Multiset           │  canonical (size, lex) ordering of variable products
//! └─────────────┬──────────────┘
//!               ▼
//! ┌──────────────────────────┐
//! │        CoeffExpr          │  sum of (rational, Multiset) terms — the coefficient ring
//! └─────────────┬──────────────┘
//!               ▼
//! ┌──────────────────────────┐
//! │         ExpVec             │  canonical (|e|, lex) ordering of exponent vectors
//! └─────────────┬──────────────┘
//!               ▼
//! ┌──────────────────────────┐
//! │        Polynomial          │  sum of (ExpVec, CoeffExpr) monomials over program vars
//! └──────────────────────────┘
//! ```
//!
//! Every public constructor and arithmetic operation returns a value already
//! in canonical form (sorted, deduplicated, zero terms dropped); there is no
//! separate "canonicalize" step the caller must remember to call.

mod coeff_expr;
mod multiset;
mod polynomial;
mod smt_print;

pub use coeff_expr::{CoeffExpr, Term};
pub use multiset::Multiset;
pub use polynomial::{ExpVec, Monomial, Polynomial};
pub use smt_print::ToSmt;
