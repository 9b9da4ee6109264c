//! Handler for `simulate`.

use serde_json::json;
use tokio::sync::watch;

use super::command::SimulateArgs;
use super::request::{read_request, SimulateRequest};
use super::{output, report};
use crate::application::session::Session;
use crate::error::Result;

/// Execute `hedgeline simulate` until done or until `shutdown` fires.
pub async fn execute(
    session: &Session,
    args: &SimulateArgs,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let request: SimulateRequest = read_request(&args.input.input)?;
    let options = request.overrides.apply(session.options);
    let stake = args
        .stake
        .or(request.stake)
        .unwrap_or_else(|| session.ledger.balance());

    let mut settings = session.simulation;
    if let Some(iterations) = args.iterations {
        settings.iterations = iterations;
    }
    if let Some(interval_ms) = args.interval_ms {
        settings.interval = std::time::Duration::from_millis(interval_ms);
    }

    output::header("simulate");
    output::field("Stake", stake.normalize());
    output::field("Rounds", settings.iterations);

    let simulation = session.simulation(settings);
    let outcome = simulation
        .run(&request.bets, stake, request.events, &options, shutdown)
        .await?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "simulate",
            "result": serde_json::to_value(&outcome)?,
            "ledger": serde_json::to_value(session.ledger.snapshot())?,
        }));
        return Ok(());
    }

    report::print_entries(&session.ledger.entries());
    output::section("Summary");
    output::field("Rounds completed", outcome.rounds);
    output::field("Final bankroll", outcome.final_bankroll.normalize());
    if outcome.cancelled {
        output::warning("Simulation interrupted");
    } else {
        output::success("Simulation finished");
    }
    Ok(())
}
