//! Integration Test: Build Profiles
//!
//! **Policy**: Panics must unwind in every profile. A panicking backend call
//! ends its request task, the orchestrator sees the closed completion channel
//! and settles to Failed. With `panic = "abort"` the whole client exits instead.

use std::fs;

use architectural_enforcement::workspace_root;

const MANIFESTS: &[&str] = &[
    "Cargo.toml",
    "core/Cargo.toml",
    "tui/Cargo.toml",
    "tests/architectural-enforcement/Cargo.toml",
];

/// `(manifest, section, line)` for every `panic = "abort"` under a profile
fn abort_settings() -> Vec<(String, String, String)> {
    let mut found = Vec::new();
    for manifest in MANIFESTS {
        let Ok(content) = fs::read_to_string(workspace_root().join(manifest)) else {
            continue;
        };

        let mut section = String::new();
        for line in content.lines() {
            let code = line.split('#').next().unwrap_or(line).trim();
            if code.starts_with('[') {
                section = code.to_string();
                continue;
            }
            let compact: String = code.chars().filter(|c| !c.is_whitespace()).collect();
            if section.starts_with("[profile") && compact == "panic=\"abort\"" {
                found.push((manifest.to_string(), section.clone(), line.to_string()));
            }
        }
    }
    found
}

#[test]
fn test_root_manifest_is_readable() {
    assert!(fs::read_to_string(workspace_root().join("Cargo.toml")).is_ok());
}

#[test]
fn test_no_profile_aborts_on_panic() {
    let settings = abort_settings();
    assert!(
        settings.is_empty(),
        "Panics must unwind so a failed request task settles to Failed: {settings:?}"
    );
}
