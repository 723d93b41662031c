//! `polyhorn` command-line interface: a thin consumer of the library crates
//! that owns no algebraic logic of its own (§6).

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use polyhorn_smt::Status;

use crate::error::CliResult;
use crate::model_toml;

#[derive(Parser)]
#[command(name = "polyhorn")]
#[command(about = "A Positivstellensatz-based reasoner for polynomial Horn clauses", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a model, run it through the configured solver, and print
    /// `(status, model)` as JSON.
    Solve {
        /// Path to a TOML model description.
        model: PathBuf,
        /// Override the model's `output_path` for the emitted script.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Wall-clock bound on the solver subprocess, in seconds.
        #[arg(long, default_value_t = 10)]
        timeout: u64,
        /// Explicit path to the solver binary, bypassing `PATH` lookup.
        #[arg(long)]
        solver_path: Option<String>,
    },
    /// Run everything up to and including the SMT encoder and write the
    /// script, without invoking a solver.
    Emit {
        /// Path to a TOML model description.
        model: PathBuf,
        /// Where to write the SMT-LIB2 script.
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Serialize)]
struct SolveReport {
    status: &'static str,
    model: HashMap<String, String>,
}

fn status_name(status: Status) -> &'static str {
    match status {
        Status::Sat => "sat",
        Status::Unsat => "unsat",
        Status::Unknown => "unknown",
    }
}

pub fn run_cli() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Solve { model, out, timeout, solver_path } => run_solve(&model, out, timeout, solver_path),
        Commands::Emit { model, out } => run_emit(&model, &out),
    }
}

fn run_solve(model_path: &PathBuf, out: Option<PathBuf>, timeout: u64, solver_path: Option<String>) -> CliResult<()> {
    let src = fs::read_to_string(model_path)?;
    let (mut model, cfg) = model_toml::load(&src)?;

    let dnfs = model.compile(&cfg)?;
    let script = polyhorn_smt::encode(&cfg, model.template_vars(), &dnfs, model.preconditions(), model.directives(), true);

    if let Some(path) = &out {
        fs::write(path, &script)?;
    } else if !cfg.output_path.is_empty() {
        fs::write(&cfg.output_path, &script)?;
    }

    let (status, values) = polyhorn_solver::run_on_solver(
        &cfg,
        solver_path.as_deref(),
        &script,
        model.template_vars(),
        Duration::from_secs(timeout),
    )?;

    let report = SolveReport { status: status_name(status), model: values };
    println!("{}", serde_json::to_string(&report).expect("SolveReport always serializes"));
    Ok(())
}

fn run_emit(model_path: &PathBuf, out: &PathBuf) -> CliResult<()> {
    let src = fs::read_to_string(model_path)?;
    let (mut model, cfg) = model_toml::load(&src)?;

    let dnfs = model.compile(&cfg)?;
    let script = polyhorn_smt::encode(&cfg, model.template_vars(), &dnfs, model.preconditions(), model.directives(), false);

    fs::write(out, script)?;
    Ok(())
}
