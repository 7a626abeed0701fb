// src/parsers/npm_outdated.rs

use std::sync::LazyLock;

use regex::Regex;

use super::plural;
use crate::types::ParsedFailure;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^package\s+current\s+wanted\s+latest").expect("npm outdated header regex")
});

static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+(\S+)\s+(\S+)\s+(\S+)").expect("npm outdated row regex")
});

static NPM_NOTICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^npm\s+").expect("npm notice regex"));

/// Counts packages whose installed version lags the version their range
/// allows. Packages pinned at `wanted` but behind `latest` are not counted.
pub fn parse(output: &str) -> Option<ParsedFailure> {
    let lines: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let data = match lines.iter().position(|l| HEADER.is_match(l)) {
        Some(idx) => &lines[idx + 1..],
        None => &lines[..],
    };

    let outdated = data
        .iter()
        .filter(|line| !NPM_NOTICE.is_match(line))
        .filter_map(|line| ROW.captures(line))
        .filter(|caps| caps[2] != caps[3])
        .count();

    let outdated = u32::try_from(outdated).unwrap_or(u32::MAX);
    if outdated == 0 {
        return None;
    }

    Some(ParsedFailure::errors(
        format!(
            "Failed - {outdated} outdated {}",
            plural(outdated, "package", "packages")
        ),
        outdated,
    ))
}
