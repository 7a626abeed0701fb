// src/parsers/cspell.rs

use std::sync::LazyLock;

use regex::Regex;

use super::{capture_count, counted};
use crate::types::ParsedFailure;

/// `CSpell: Files checked: 12, Issues found: 3 in 2 files`
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)issues?\s+found:\s*(\d+)(?:\s+in\s+(\d+)\s+files?)?")
        .expect("cspell summary regex")
});

/// `src/a.ts:4:7 - Unknown word (recieve)`
static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)-\s+unknown\s+word\b").expect("cspell row regex"));

pub fn parse(output: &str) -> Option<ParsedFailure> {
    let (issues, files) = match SUMMARY.captures(output) {
        Some(caps) => (capture_count(&caps, 1), capture_count(&caps, 2)),
        None => (
            u32::try_from(ROW.find_iter(output).count()).unwrap_or(u32::MAX),
            0,
        ),
    };

    if issues == 0 {
        return None;
    }

    let files_text = if files > 0 {
        format!(" in {}", counted(files, "file", "files"))
    } else {
        String::new()
    };

    Some(ParsedFailure::errors(
        format!(
            "Failed - {}{files_text}",
            counted(issues, "issue", "issues")
        ),
        issues,
    ))
}
