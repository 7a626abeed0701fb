// src/parsers/vitest.rs

use std::sync::LazyLock;

use regex::Regex;

use super::{capture_count, counted};
use crate::types::ParsedFailure;

/// ` Failed Suites 2 ` banner printed when whole files fail to load.
static FAILED_SUITES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)failed\s+suites\s+(\d+)\b").expect("vitest suites regex")
});

static FAILED_FILES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)test\s+files\s+(\d+)\s+failed").expect("vitest files regex")
});

static FAILED_TESTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\btests\s+(\d+)\s+failed").expect("vitest tests regex")
});

/// Per-test failure markers, used when no summary block is present.
static FAIL_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(?:×|✗|FAIL)\s+\S").expect("vitest row regex"));

pub fn parse(output: &str) -> Option<ParsedFailure> {
    if let Some(caps) = FAILED_SUITES.captures(output) {
        let suites = capture_count(&caps, 1);
        if suites > 0 {
            return Some(ParsedFailure::errors(
                format!("Failed - {} failed", counted(suites, "suite", "suites")),
                suites,
            ));
        }
    }

    let files = FAILED_FILES.captures(output).map(|c| capture_count(&c, 1));
    let tests = FAILED_TESTS.captures(output).map(|c| capture_count(&c, 1));

    let (files, tests) = match (files, tests) {
        (None, None) => {
            let rows = u32::try_from(FAIL_ROW.find_iter(output).count()).unwrap_or(u32::MAX);
            (0, rows)
        }
        (files, tests) => (files.unwrap_or(0), tests.unwrap_or(0)),
    };

    if files == 0 && tests == 0 {
        return None;
    }

    let (message, errors) = match (tests, files) {
        (0, files) => (
            format!("Failed - {} failed", counted(files, "file", "files")),
            files,
        ),
        (tests, 0) => (
            format!("Failed - {} failed", counted(tests, "test", "tests")),
            tests,
        ),
        (tests, files) => (
            format!(
                "Failed - {} failed in {}",
                counted(tests, "test", "tests"),
                counted(files, "file", "files")
            ),
            tests,
        ),
    };

    Some(ParsedFailure::errors(message, errors))
}
