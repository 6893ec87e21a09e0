//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The core stays headless (no terminal crates)
//! - Reveal engines know nothing about requests
//! - Production code propagates errors instead of panicking
//! - Panics unwind in every build profile
//!
//! The helpers below scan source files line by line. Test modules are
//! skipped: everything from the first `#[cfg(test)]` to the end of a file
//! counts as test code.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this package
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// A production source line
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Line text with any `//` comment removed
    pub code: String,
}

impl std::fmt::Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.number, self.code.trim())
    }
}

/// All `.rs` files under `dir` (relative to the workspace root)
#[must_use]
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Non-test, non-comment lines of every `.rs` file under `dir`
#[must_use]
pub fn production_lines(dir: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    for path in rust_files(dir) {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for (idx, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }
            let code = line.split("//").next().unwrap_or(line);
            if code.trim().is_empty() {
                continue;
            }
            lines.push(SourceLine {
                path: path.clone(),
                number: idx + 1,
                code: code.to_string(),
            });
        }
    }
    lines
}

/// Production lines under `dir` containing any of `needles`
#[must_use]
pub fn find_violations(dir: &str, needles: &[&str]) -> Vec<SourceLine> {
    production_lines(dir)
        .into_iter()
        .filter(|line| needles.iter().any(|n| line.code.contains(n)))
        .collect()
}

/// Print violations and panic if there are any
pub fn report(rule: &str, violations: &[SourceLine]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {rule}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!(
        "\nFound {} violation(s) of: {rule}\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_finds_workspace_sources() {
        assert!(!rust_files("core/src").is_empty());
        assert!(!production_lines("tui/src").is_empty());
    }

    #[test]
    fn test_scanner_skips_this_test_module() {
        let hits = find_violations("tests/architectural-enforcement/src", &["scanner_skips"]);
        assert!(hits.is_empty(), "{hits:?}");
    }
}
