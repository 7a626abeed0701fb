// src/parsers/eslint.rs

use std::sync::LazyLock;

use regex::Regex;

use super::{capture_count, counted};
use crate::types::ParsedFailure;

/// `✖ 5 problems (3 errors, 2 warnings)`
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s+problems?\s+\((\d+)\s+errors?(?:,\s+(\d+)\s+warnings?)?")
        .expect("eslint summary regex")
});

/// Stylish formatter rows: `  12:5  error  'x' is defined but never used  no-unused-vars`
static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*\d+:\d+\s+(error|warning)\s").expect("eslint row regex")
});

pub fn parse(output: &str) -> Option<ParsedFailure> {
    let (errors, warnings) = match SUMMARY.captures(output) {
        Some(caps) => (capture_count(&caps, 2), capture_count(&caps, 3)),
        None => count_rows(output),
    };

    if errors == 0 && warnings == 0 {
        return None;
    }

    if errors == 0 {
        return Some(
            ParsedFailure::new(format!(
                "Failed - {}",
                counted(warnings, "warning", "warnings")
            ))
            .with_warnings(warnings),
        );
    }

    let mut parts = vec![counted(errors, "error", "errors")];
    if warnings > 0 {
        parts.push(counted(warnings, "warning", "warnings"));
    }

    let mut failure = ParsedFailure::errors(format!("Failed - {}", parts.join(" and ")), errors);
    if warnings > 0 {
        failure = failure.with_warnings(warnings);
    }
    Some(failure)
}

fn count_rows(output: &str) -> (u32, u32) {
    ROW.captures_iter(output)
        .fold((0, 0), |(errors, warnings), caps| {
            if caps[1].eq_ignore_ascii_case("error") {
                (errors + 1, warnings)
            } else {
                (errors, warnings + 1)
            }
        })
}
