// src/parsers/mod.rs

//! Output classifiers for the bundled quality tools.
//!
//! Every parser receives the ANSI-stripped, combined stdout+stderr of one
//! tool run and returns `Some(ParsedFailure)` only when the output reports a
//! non-zero number of problems. Matching is case-insensitive; a structured
//! summary line wins over per-line heuristics.
//!
//! Parsers are looked up by tool identifier through [`ParserRegistry`].

pub mod cspell;
pub mod eslint;
pub mod knip;
pub mod markdownlint;
pub mod npm_audit;
pub mod npm_outdated;
pub mod prettier;
pub mod registry;
pub mod typescript;
pub mod vitest;

pub use registry::{ParserFn, ParserRegistry};

pub const PRETTIER: &str = "Prettier";
pub const ESLINT: &str = "ESLint";
pub const MARKDOWNLINT: &str = "MarkdownLint";
pub const CSPELL: &str = "CSpell";
pub const TYPESCRIPT: &str = "TypeScript";
pub const VITEST: &str = "Vitest";
pub const KNIP: &str = "Knip";
pub const NPM_AUDIT: &str = "npm audit";
pub const NPM_OUTDATED: &str = "npm outdated";

/// Pick the singular or plural noun for `count`.
pub fn plural<'a>(count: u32, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

/// `"3 errors"`, `"1 file"`.
pub fn counted(count: u32, one: &str, many: &str) -> String {
    format!("{count} {}", plural(count, one, many))
}

/// Parse a regex capture group as a count. Overflowing or missing groups
/// count as zero.
pub(crate) fn capture_count(caps: &regex::Captures<'_>, group: usize) -> u32 {
    caps.get(group)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}
