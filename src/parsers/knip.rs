// src/parsers/knip.rs

use std::sync::LazyLock;

use regex::Regex;

use super::{capture_count, counted};
use crate::types::ParsedFailure;

/// Section headers carry their counts: `Unused files (3)`.
static SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)").expect("knip section regex"));

static ISSUES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s+issues?\b").expect("knip issues regex"));

pub fn parse(output: &str) -> Option<ParsedFailure> {
    let mut total = SECTION
        .captures_iter(output)
        .map(|caps| capture_count(&caps, 1))
        .fold(0u32, u32::saturating_add);

    if total == 0 {
        total = ISSUES
            .captures(output)
            .map(|caps| capture_count(&caps, 1))
            .unwrap_or(0);
    }

    if total == 0 {
        return None;
    }

    Some(ParsedFailure::errors(
        format!("Failed - {}", counted(total, "issue", "issues")),
        total,
    ))
}
