//! Integration Test: Panic Prohibition
//!
//! **Policy**: Production code propagates errors with `?` and typed errors.
//! `unwrap()`, `expect()` and blocking sleeps are allowed in tests only.

use architectural_enforcement::{find_violations, report};

const PANICKING: &[&str] = &[".unwrap()", ".expect(", "panic!(", "unreachable!("];

#[test]
fn test_no_unwrap_in_core() {
    report(
        "No unwrap/expect/panic in core production code",
        &find_violations("core/src", PANICKING),
    );
}

#[test]
fn test_no_unwrap_in_tui() {
    report(
        "No unwrap/expect/panic in TUI production code",
        &find_violations("tui/src", PANICKING),
    );
}

#[test]
fn test_no_blocking_sleep() {
    for dir in ["core/src", "tui/src"] {
        report(
            "Use tokio::time::sleep, never std::thread::sleep",
            &find_violations(dir, &["thread::sleep"]),
        );
    }
}
