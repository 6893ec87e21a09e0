//! Integration Test: Layering
//!
//! **Policy**: `sentiment-core` is headless. Terminal crates live in the TUI only.
//! **Policy**: Reveal engines are generic text animators and never reach into
//! the request side (orchestrator, backends).

use std::fs;

use architectural_enforcement::{find_violations, report, workspace_root};

#[test]
fn test_core_manifest_has_no_terminal_crates() {
    let manifest = fs::read_to_string(workspace_root().join("core/Cargo.toml"))
        .expect("core/Cargo.toml readable");

    for forbidden in ["ratatui", "crossterm"] {
        assert!(
            !manifest.lines().any(|l| l.trim_start().starts_with(forbidden)),
            "core/Cargo.toml must not depend on {forbidden}"
        );
    }
}

#[test]
fn test_core_sources_never_touch_the_terminal() {
    let violations = find_violations("core/src", &["ratatui::", "crossterm::"]);
    report("Core must not use terminal crates", &violations);
}

#[test]
fn test_reveal_engines_are_request_agnostic() {
    let violations = find_violations(
        "core/src/reveal",
        &["crate::orchestrator", "crate::backend", "RequestState", "reqwest"],
    );
    report("Reveal engines must not depend on the request side", &violations);
}

#[test]
fn test_widgets_do_not_drive_requests() {
    let violations = find_violations("tui/src/widgets", &["RequestOrchestrator", "SentimentBackend"]);
    report("Widgets only render frames", &violations);
}
