// src/parsers/markdownlint.rs

use std::sync::LazyLock;

use regex::Regex;

use super::{capture_count, counted};
use crate::types::ParsedFailure;

/// markdownlint-cli2: `Summary: 4 error(s)`
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)summary:\s*(\d+)\s*error\(s\)").expect("markdownlint summary regex")
});

/// `README.md:12:1 MD022/blanks-around-headings ...` or `README.md:12 MD013/...`
static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\S+:\d+(?::\d+)?\s+MD\d{3}\b").expect("markdownlint row regex")
});

pub fn parse(output: &str) -> Option<ParsedFailure> {
    let count = match SUMMARY.captures(output) {
        Some(caps) => capture_count(&caps, 1),
        None => u32::try_from(ROW.find_iter(output).count()).unwrap_or(u32::MAX),
    };

    if count == 0 {
        return None;
    }

    Some(ParsedFailure::errors(
        format!("Failed - {}", counted(count, "error", "errors")),
        count,
    ))
}
