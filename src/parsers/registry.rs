// src/parsers/registry.rs

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::types::ParsedFailure;

/// A classifier from combined tool output to an optional failure.
pub type ParserFn = Arc<dyn Fn(&str) -> Option<ParsedFailure> + Send + Sync>;

/// Mapping from tool identifier to output classifier.
///
/// Built once at startup and handed to task construction by reference;
/// there is no process-global registry. Registering an identifier twice
/// replaces the earlier parser.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, ParserFn>,
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tools: Vec<&str> = self.tools().collect();
        tools.sort_unstable();
        f.debug_struct("ParserRegistry")
            .field("tools", &tools)
            .finish()
    }
}

impl ParserRegistry {
    /// An empty registry. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every bundled parser.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::PRETTIER, super::prettier::parse);
        registry.register(super::ESLINT, super::eslint::parse);
        registry.register(super::MARKDOWNLINT, super::markdownlint::parse);
        registry.register(super::CSPELL, super::cspell::parse);
        registry.register(super::TYPESCRIPT, super::typescript::parse);
        registry.register(super::VITEST, super::vitest::parse);
        registry.register(super::KNIP, super::knip::parse);
        registry.register(super::NPM_AUDIT, super::npm_audit::parse);
        registry.register(super::NPM_OUTDATED, super::npm_outdated::parse);
        registry
    }

    pub fn register<F>(&mut self, tool: impl Into<String>, parser: F)
    where
        F: Fn(&str) -> Option<ParsedFailure> + Send + Sync + 'static,
    {
        self.parsers.insert(tool.into(), Arc::new(parser));
    }

    /// The parser bound to `tool`, if any.
    ///
    /// A miss is not an error: a task without a parser succeeds whenever its
    /// command exits with status 0.
    pub fn lookup(&self, tool: &str) -> Option<ParserFn> {
        self.parsers.get(tool).cloned()
    }

    pub fn has(&self, tool: &str) -> bool {
        self.parsers.contains_key(tool)
    }

    pub fn tools(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}
