//! Handler for `cashout`.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::CashoutArgs;
use super::request::{read_request, CashoutRequest};
use super::{output, report};
use crate::application::cashout::{CashoutReport, OfferStatus};
use crate::application::session::Session;
use crate::error::Result;

#[derive(Tabled)]
struct OfferRow {
    #[tabled(rename = "Bet")]
    bet: String,
    #[tabled(rename = "Stake")]
    stake: Decimal,
    #[tabled(rename = "Odds")]
    odds: Decimal,
    #[tabled(rename = "Offer")]
    offer: Decimal,
    #[tabled(rename = "Ratio")]
    ratio: Decimal,
    #[tabled(rename = "ΔR")]
    delta: Decimal,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Execute `hedgeline cashout`.
pub fn execute(session: &Session, args: &CashoutArgs) -> Result<()> {
    let request: CashoutRequest = read_request(&args.input.input)?;
    let report = session.valuator.value(
        &request.stakes,
        &request.bets,
        request.updated_odds.as_ref(),
        args.dry_run,
        Some(session.ledger.as_ref()),
    )?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "cashout",
            "dry_run": args.dry_run,
            "result": serde_json::to_value(&report)?,
            "ledger": serde_json::to_value(session.ledger.snapshot())?,
        }));
        return Ok(());
    }

    output::header("cashout");
    print_report(&report);
    if !report.accepted.is_empty() {
        report::print_entries(&session.ledger.entries());
    }
    Ok(())
}

fn print_report(report: &CashoutReport) {
    output::field("Base net", output::signed(report.base_net));

    let rows: Vec<OfferRow> = report
        .offers
        .iter()
        .map(|o| OfferRow {
            bet: o.bet_id.to_string(),
            stake: o.stake.normalize(),
            odds: o.odds.normalize(),
            offer: o.offer.normalize(),
            ratio: o.ratio.normalize(),
            delta: o.delta_net.round_dp(4).normalize(),
            status: match o.status {
                OfferStatus::Profitable => "profitable",
                OfferStatus::NotProfitable => "not profitable",
            },
        })
        .collect();
    output::section("Offers");
    output::lines(&Table::new(rows).to_string());

    if report.accepted.is_empty() {
        output::note("No offers accepted");
    } else {
        output::success(&format!(
            "Accepted {} offers for {}",
            report.accepted.len(),
            report.total_cashout.normalize()
        ));
    }
}
