//! Handlers for `solve`, `recalibrate` and `smooth`.

use serde_json::json;

use super::command::InputArgs;
use super::request::{read_request, RecalibrateRequest, SmoothRequest, SolveRequest};
use super::{output, report};
use crate::application::session::Session;
use crate::application::smoothing::Smoother;
use crate::error::Result;

/// Execute `hedgeline solve`.
pub fn execute_solve(session: &Session, args: &InputArgs) -> Result<()> {
    let request: SolveRequest = read_request(&args.input)?;
    let options = request.overrides.apply(session.options);
    let result = session
        .allocation
        .solve(&request.bets, request.bankroll, request.events, &options);

    if output::is_json() {
        let body = match &result {
            Ok(solution) => serde_json::to_value(solution)?,
            Err(err) => serde_json::to_value(err)?,
        };
        output::json_output(&json!({ "command": "solve", "result": body }));
    } else {
        output::header("solve");
        match &result {
            Ok(solution) => report::print_solution(&request.bets, solution),
            Err(err) => report::print_failure(err),
        }
    }

    result.map(|_| ()).map_err(Into::into)
}

/// Execute `hedgeline recalibrate`.
pub fn execute_recalibrate(session: &Session, args: &InputArgs) -> Result<()> {
    let request: RecalibrateRequest = read_request(&args.input)?;
    let options = request.overrides.apply(session.options);
    let bankroll = request.bankroll.unwrap_or_else(|| request.stakes.total());
    let recalibration = session.recalibrator.recalibrate(
        &request.bets,
        &request.stakes,
        bankroll,
        &request.updated_odds,
        request.events,
        &options,
    )?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "recalibrate",
            "result": serde_json::to_value(&recalibration)?,
        }));
        return Ok(());
    }

    output::header("recalibrate");
    output::field("Current net", output::signed(recalibration.current_net));
    report::print_scenarios("Current position", &recalibration.current_scenarios);
    output::section("Recommended");
    match &recalibration.recommended {
        Ok(solution) => {
            let repriced = crate::domain::bet::reprice_all(&request.bets, &request.updated_odds);
            report::print_solution(&repriced, solution);
        }
        Err(err) => report::print_failure(err),
    }
    Ok(())
}

/// Execute `hedgeline smooth`.
pub fn execute_smooth(session: &Session, args: &InputArgs) -> Result<()> {
    let request: SmoothRequest = read_request(&args.input)?;
    let options = request.overrides.apply(session.options);
    let smoother = match request.lambda {
        Some(lambda) => Smoother::new(lambda)?,
        None => session.smoother,
    };

    let result = smoother.solve_smoothed(
        &session.allocation,
        &request.bets,
        request.bankroll,
        request.events,
        &options,
        &request.previous,
    );

    if output::is_json() {
        let body = match &result {
            Ok(smoothed) => serde_json::to_value(smoothed)?,
            Err(err) => serde_json::to_value(err)?,
        };
        output::json_output(&json!({ "command": "smooth", "result": body }));
    } else {
        output::header("smooth");
        match &result {
            Ok(smoothed) => {
                report::print_solution(&request.bets, &smoothed.solution);
                output::section(&format!("Smoothed stakes (lambda {})", smoother.lambda()));
                for (id, stake) in smoothed.stakes_smoothed.iter() {
                    output::field(id.as_str(), stake.normalize());
                }
            }
            Err(err) => report::print_failure(err),
        }
    }

    result.map(|_| ()).map_err(Into::into)
}
