//! Table rendering of reports shared by several commands.

use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::allocation::{Scenario, Solution};
use crate::domain::bet::Bet;
use crate::domain::ledger::LedgerEntry;
use crate::error::AllocationError;

#[derive(Tabled)]
struct StakeRow {
    #[tabled(rename = "Bet")]
    bet: String,
    #[tabled(rename = "Event")]
    event: usize,
    #[tabled(rename = "Covers")]
    covers: String,
    #[tabled(rename = "Odds")]
    odds: Decimal,
    #[tabled(rename = "Units")]
    units: i64,
    #[tabled(rename = "Stake")]
    stake: Decimal,
}

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Payout")]
    payout: Decimal,
    #[tabled(rename = "Net")]
    net: Decimal,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Action")]
    action: &'static str,
    #[tabled(rename = "Amount")]
    amount: Decimal,
    #[tabled(rename = "Balance")]
    balance: Decimal,
    #[tabled(rename = "Note")]
    note: String,
}

/// Print stakes, outcome nets and metrics of a solution.
pub fn print_solution(bets: &[Bet], solution: &Solution) {
    output::field("Status", format!("{:?}", solution.status));
    output::field("Total stake", solution.total_stakes.normalize());
    output::field("Guaranteed net", output::signed(solution.guaranteed_net));
    output::field(
        "Mean / std net",
        format!(
            "{:.4} / {:.4}",
            solution.risk_metrics.mean_net, solution.risk_metrics.std_net
        ),
    );
    output::field(
        "Overround",
        format!(
            "{} ({:?})",
            solution.market.overround.round_dp(4),
            solution.market.market_bias
        ),
    );

    let rows: Vec<StakeRow> = bets
        .iter()
        .map(|bet| StakeRow {
            bet: bet.id().to_string(),
            event: bet.event(),
            covers: bet
                .covered()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("/"),
            odds: bet.odds(),
            units: solution.units.get(bet.id()).copied().unwrap_or(0),
            stake: solution.stakes.stake(bet.id()).normalize(),
        })
        .collect();
    output::section("Stakes");
    output::lines(&Table::new(rows).to_string());

    print_scenarios("Outcomes", &solution.scenarios);
}

/// Print per-outcome payouts and nets.
pub fn print_scenarios(title: &str, scenarios: &[Scenario]) {
    let rows: Vec<ScenarioRow> = scenarios
        .iter()
        .map(|s| ScenarioRow {
            outcome: s.outcome.to_string(),
            payout: s.payout.normalize(),
            net: s.net.normalize(),
        })
        .collect();
    output::section(title);
    output::lines(&Table::new(rows).to_string());
}

/// Print a failed solve.
pub fn print_failure(err: &AllocationError) {
    output::field("Status", err.status());
    output::warning(&err.to_string());
}

/// Print the ledger log.
pub fn print_entries(entries: &[LedgerEntry]) {
    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|e| EntryRow {
            time: e.time.format("%H:%M:%S").to_string(),
            action: e.action.as_str(),
            amount: e.amount.normalize(),
            balance: e.balance_after.normalize(),
            note: e.note.clone(),
        })
        .collect();
    output::section("Ledger");
    output::lines(&Table::new(rows).to_string());
}
