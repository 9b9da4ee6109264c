//! Handler for `settle`.

use serde_json::json;

use super::command::SettleArgs;
use super::request::{read_request, SettleRequest};
use super::{output, report};
use crate::application::session::Session;
use crate::application::settlement::Settlement;
use crate::error::Result;

/// Execute `hedgeline settle`.
pub fn execute(session: &Session, args: &SettleArgs) -> Result<()> {
    let request: SettleRequest = read_request(&args.input.input)?;
    let options = request.overrides.apply(session.options);
    let settlement = session.settlement.settle(
        &request.bets,
        &request.stakes,
        request.initial_bankroll,
        &request.results,
        &options,
    );

    let balance = if args.record {
        Some(session.settlement.record(session.ledger.as_ref(), &settlement)?)
    } else {
        None
    };

    if output::is_json() {
        output::json_output(&json!({
            "command": "settle",
            "result": serde_json::to_value(&settlement)?,
            "ledger_balance": balance,
        }));
        return Ok(());
    }

    output::header("settle");
    output::field("Realized", settlement.realized().normalize());
    output::field("Bankroll after", output::signed(settlement.bankroll_after()));
    match &settlement {
        Settlement::AllSettled { .. } => output::success("All bets settled"),
        Settlement::HedgeSuggested {
            open_bets,
            remaining_solution,
            ..
        } => {
            output::section("Hedge for open bets");
            match remaining_solution {
                Ok(solution) => {
                    let open: Vec<_> = request
                        .bets
                        .iter()
                        .filter(|b| open_bets.contains(b.id()))
                        .cloned()
                        .collect();
                    report::print_solution(&open, solution);
                }
                Err(err) => report::print_failure(err),
            }
        }
    }
    if let Some(balance) = balance {
        output::field("Ledger balance", balance.normalize());
    }
    Ok(())
}
