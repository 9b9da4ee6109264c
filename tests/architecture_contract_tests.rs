//! Architecture contract tests.

mod support;

use support::architecture::{exists, source_of, SourceTree};

#[test]
fn scanner_reports_known_lines() {
    let tree = SourceTree::load("src");

    let hits = tree.mentions(&["pub fn build_session("]);
    assert_eq!(hits.len(), 1, "{hits:#?}");
    assert!(hits[0].location.starts_with("src/infrastructure/bootstrap.rs:"));

    assert!(tree.mentions(&["no such needle in any source file \u{0}"]).is_empty());
}

#[test]
fn cli_has_no_direct_infrastructure_imports() {
    let hits = SourceTree::load("src/adapter/inbound/cli")
        .mentions(&["use crate::infrastructure", "crate::infrastructure::"]);

    assert!(
        hits.is_empty(),
        "found direct infrastructure imports in inbound CLI adapters: {hits:#?}"
    );
}

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = SourceTree::load("src/domain").mentions(&[
        "crate::adapter",
        "crate::infrastructure",
        "crate::application",
        "crate::port",
        "tokio::",
        "good_lp::",
        "tracing_subscriber::",
    ]);

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    let violations = SourceTree::load("src").mod_rs_bodies();
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = SourceTree::load("src/application")
        .mentions(&["crate::adapter::", "crate::infrastructure::"]);
    assert!(
        hits.is_empty(),
        "application layer should not import adapters directly: {hits:#?}"
    );
}

#[test]
fn solver_backend_is_only_named_by_its_adapter() {
    let hits = SourceTree::load("src/application").mentions(&["good_lp", "highs"]);
    assert!(
        hits.is_empty(),
        "application layer should depend on the solver port only: {hits:#?}"
    );
}

#[test]
fn outbound_contracts_live_in_port_layer() {
    for file in [
        "src/port/outbound/solver.rs",
        "src/port/outbound/ledger.rs",
        "src/port/outbound/odds.rs",
    ] {
        assert!(exists(file), "expected outbound port `{file}`");
    }
}

#[test]
fn session_is_assembled_by_infrastructure_bootstrap() {
    let source = source_of("src/infrastructure/bootstrap.rs");
    assert!(
        source.contains("pub fn build_session("),
        "bootstrap should expose `build_session`"
    );

    let main = source_of("src/main.rs");
    assert!(
        main.contains("build_session("),
        "binary should obtain its session from the bootstrap"
    );
}

#[test]
fn cli_dispatch_is_split_per_command() {
    for file in [
        "src/adapter/inbound/cli/allocate.rs",
        "src/adapter/inbound/cli/cashout.rs",
        "src/adapter/inbound/cli/settle.rs",
        "src/adapter/inbound/cli/simulate.rs",
        "src/adapter/inbound/cli/run.rs",
    ] {
        assert!(exists(file), "expected CLI module `{file}`");
    }

    let run = source_of("src/adapter/inbound/cli/run.rs");
    assert!(
        !run.contains("AllocationSolver::new("),
        "CLI dispatch should not construct solvers itself"
    );
}
