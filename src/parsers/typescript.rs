// src/parsers/typescript.rs

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::{capture_count, counted};
use crate::types::ParsedFailure;

/// `Found 3 errors in 2 files.`
static SUMMARY_WITH_FILES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)found\s+(\d+)\s+errors?\s+in\s+(\d+)\s+files?")
        .expect("tsc summary regex")
});

/// `Found 1 error.` / `Found 4 errors in the same file`
static SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)found\s+(\d+)\s+errors?").expect("tsc count regex"));

/// Classic `src/a.ts(3,7): error TS2322: ...` and pretty
/// `src/a.ts:3:7 - error TS2322: ...` diagnostics.
static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^([^\s(][^(\n]*?)(?:\(\d+,\d+\):|:\d+:\d+\s+-)\s+error\s+TS\d+:")
        .expect("tsc row regex")
});

pub fn parse(output: &str) -> Option<ParsedFailure> {
    if let Some(caps) = SUMMARY_WITH_FILES.captures(output) {
        let errors = capture_count(&caps, 1);
        let files = capture_count(&caps, 2);
        return (errors > 0).then(|| failure_in_files(errors, files));
    }

    if let Some(caps) = SUMMARY.captures(output) {
        let errors = capture_count(&caps, 1);
        return (errors > 0).then(|| {
            ParsedFailure::errors(
                format!("Failed - {}", counted(errors, "error", "errors")),
                errors,
            )
        });
    }

    let mut files = HashSet::new();
    let mut errors = 0u32;
    for caps in ROW.captures_iter(output) {
        errors = errors.saturating_add(1);
        let file = caps[1].trim();
        if !file.is_empty() {
            files.insert(file.to_string());
        }
    }

    if errors == 0 {
        return None;
    }

    let files = u32::try_from(files.len()).unwrap_or(u32::MAX);
    Some(failure_in_files(errors, files))
}

fn failure_in_files(errors: u32, files: u32) -> ParsedFailure {
    ParsedFailure::errors(
        format!(
            "Failed - {} in {}",
            counted(errors, "error", "errors"),
            counted(files, "file", "files")
        ),
        errors,
    )
}
