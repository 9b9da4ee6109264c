//! Command dispatch.

use tokio::sync::watch;

use super::command::{Cli, Commands};
use super::{allocate, cashout, settle, simulate};
use crate::application::session::Session;
use crate::error::Result;

/// Dispatch a parsed command against `session`.
///
/// `shutdown` is observed by long-running commands only.
pub async fn execute(cli: &Cli, session: &Session, shutdown: watch::Receiver<bool>) -> Result<()> {
    match &cli.command {
        Commands::Solve(args) => allocate::execute_solve(session, args),
        Commands::Recalibrate(args) => allocate::execute_recalibrate(session, args),
        Commands::Smooth(args) => allocate::execute_smooth(session, args),
        Commands::Settle(args) => settle::execute(session, args),
        Commands::Cashout(args) => cashout::execute(session, args),
        Commands::Simulate(args) => simulate::execute(session, args, shutdown).await,
    }
}
