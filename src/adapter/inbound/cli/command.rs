//! Command-line interface definitions.
//!
//! Every command reads a JSON request file (or `-` for stdin) and prints a
//! report, as tables or as one JSON document with `--json`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Max-min stake allocation, recalibration and cash-out valuation
#[derive(Parser, Debug)]
#[command(name = "hedgeline")]
#[command(version)]
pub struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the stake allocation maximizing the guaranteed net
    Solve(InputArgs),

    /// Evaluate current stakes under updated odds and re-solve
    Recalibrate(InputArgs),

    /// Settle finished events and re-hedge the open bets
    Settle(SettleArgs),

    /// Value open bets for cash-out
    Cashout(CashoutArgs),

    /// Solve and blend with a previous allocation
    Smooth(InputArgs),

    /// Run the live odds-drift and cash-out loop
    Simulate(SimulateArgs),
}

/// A request file.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// JSON request file, or `-` for stdin
    pub input: PathBuf,
}

/// Arguments for `hedgeline settle`.
#[derive(Args, Debug)]
pub struct SettleArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Credit realized proceeds to the session ledger
    #[arg(long)]
    pub record: bool,
}

/// Arguments for `hedgeline cashout`.
#[derive(Args, Debug)]
pub struct CashoutArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Quote offers without accepting any
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `hedgeline simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Total stake to place (overrides the request)
    #[arg(long)]
    pub stake: Option<Decimal>,

    /// Number of cash-out rounds (overrides `[simulation].iterations`)
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Pause between rounds in milliseconds (overrides `[simulation].interval_ms`)
    #[arg(long)]
    pub interval_ms: Option<u64>,
}
