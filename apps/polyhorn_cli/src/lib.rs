//! `polyhorn` — the command-line front end for the PolyHorn reasoner.
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`cli`] | Argument parsing and subcommand dispatch |
//! | [`model_toml`] | TOML model description → `PositiveModel` + `Config` |
//! | [`poly_expr`] | Prefix-notation polynomial/coefficient expression parsing |
//! | [`error`] | The CLI's own error enum, chaining the library crates' errors |

pub mod cli;
pub mod error;
pub mod model_toml;
pub mod poly_expr;

pub use cli::run_cli;
