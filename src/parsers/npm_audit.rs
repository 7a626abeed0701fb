// src/parsers/npm_audit.rs

use std::sync::LazyLock;

use regex::Regex;

use super::{capture_count, plural};
use crate::types::ParsedFailure;

/// `found 3 vulnerabilities (1 low, 2 high)` / `3 vulnerabilities (1 moderate, 2 high)`
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:found\s+)?(\d+)\s+vulnerabilit(?:y|ies)(?:\s+\(([^)]+)\))?")
        .expect("npm audit summary regex")
});

static NPM_ERR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)npm\s+err!").expect("npm err regex"));

static MENTIONS_VULNERABILITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)vulnerabilit").expect("vulnerability regex"));

pub fn parse(output: &str) -> Option<ParsedFailure> {
    if let Some(caps) = SUMMARY.captures(output) {
        let total = capture_count(&caps, 1);
        if total == 0 {
            return None;
        }

        let breakdown: Vec<&str> = caps
            .get(2)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let detail = if breakdown.is_empty() {
            String::new()
        } else {
            format!(" ({})", breakdown.join(", "))
        };

        return Some(ParsedFailure::errors(
            format!(
                "Failed - {total} {}{detail}",
                plural(total, "vulnerability", "vulnerabilities")
            ),
            total,
        ));
    }

    if NPM_ERR.is_match(output) || MENTIONS_VULNERABILITY.is_match(output) {
        return Some(ParsedFailure::errors("Failed - vulnerabilities detected", 1));
    }

    None
}
