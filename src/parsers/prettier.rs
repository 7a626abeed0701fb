// src/parsers/prettier.rs

use std::sync::LazyLock;

use regex::Regex;

use super::{capture_count, counted};
use crate::types::ParsedFailure;

static SUMMARIES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+)\s+files?\s+(?:are|is)\s+not\s+formatted",
        r"(?i)(\d+)\s+files?\s+with\s+code\s+style\s+issues?",
        r"(?i)code\s+style\s+issues\s+found\s+in\s+(\d+)\s+files?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("prettier summary regex"))
    .collect()
});

static SINGLE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)code\s+style\s+issues\s+found\s+in\s+the\s+above\s+file")
        .expect("prettier single-file regex")
});

/// `[warn] src/index.ts` lines emitted by `prettier --check` per file.
static WARN_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\[warn\]\s+(\S.*)$").expect("prettier warn regex"));

pub fn parse(output: &str) -> Option<ParsedFailure> {
    let count = SUMMARIES
        .iter()
        .find_map(|re| re.captures(output).map(|caps| capture_count(&caps, 1)))
        .or_else(|| SINGLE_FILE.is_match(output).then_some(1))
        .unwrap_or_else(|| count_warned_files(output));

    if count == 0 {
        return None;
    }

    Some(ParsedFailure::errors(
        format!(
            "Failed - {} with formatting issues",
            counted(count, "file", "files")
        ),
        count,
    ))
}

fn count_warned_files(output: &str) -> u32 {
    let files = WARN_ROW
        .captures_iter(output)
        .filter(|caps| !caps[1].to_lowercase().contains("code style issues"))
        .count();
    u32::try_from(files).unwrap_or(u32::MAX)
}
