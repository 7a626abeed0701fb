// src/config/defaults.rs

use crate::parsers::{self, ParserRegistry};
use crate::task::TaskDefinition;

/// A tool is-it-ready knows how to classify, with its stock commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub label: &'static str,
    pub tool: &'static str,
    pub command: &'static str,
    pub loose_command: Option<&'static str>,
    pub fix_command: Option<&'static str>,
    /// Part of the task list used when no config file exists.
    pub enabled_by_default: bool,
}

static CATALOGUE: [CatalogueEntry; 9] = [
    CatalogueEntry {
        label: "Formatting",
        tool: parsers::PRETTIER,
        command: "npx prettier --check .",
        loose_command: None,
        fix_command: Some("npx prettier --write ."),
        enabled_by_default: true,
    },
    CatalogueEntry {
        label: "Linting",
        tool: parsers::ESLINT,
        command: "npx eslint .",
        loose_command: Some("npx eslint . --quiet"),
        fix_command: Some("npx eslint . --fix"),
        enabled_by_default: true,
    },
    CatalogueEntry {
        label: "MD Linting",
        tool: parsers::MARKDOWNLINT,
        command: "npx markdownlint-cli2 \"**/*.md\" \"#node_modules\"",
        loose_command: None,
        fix_command: Some("npx markdownlint-cli2 --fix \"**/*.md\" \"#node_modules\""),
        enabled_by_default: true,
    },
    CatalogueEntry {
        label: "Spell Checking",
        tool: parsers::CSPELL,
        command: "npx cspell lint --no-progress .",
        loose_command: None,
        fix_command: None,
        enabled_by_default: true,
    },
    CatalogueEntry {
        label: "Type Checking",
        tool: parsers::TYPESCRIPT,
        command: "npx tsc --noEmit",
        loose_command: None,
        fix_command: None,
        enabled_by_default: true,
    },
    CatalogueEntry {
        label: "Tests",
        tool: parsers::VITEST,
        command: "npx vitest run",
        loose_command: None,
        fix_command: None,
        enabled_by_default: true,
    },
    CatalogueEntry {
        label: "Inventory",
        tool: parsers::KNIP,
        command: "npx knip",
        loose_command: Some("npx knip --production"),
        fix_command: Some("npx knip --fix"),
        enabled_by_default: true,
    },
    CatalogueEntry {
        label: "Package Health",
        tool: parsers::NPM_AUDIT,
        command: "npm audit",
        loose_command: Some("npm audit --omit=dev"),
        fix_command: Some("npm audit fix"),
        enabled_by_default: true,
    },
    CatalogueEntry {
        label: "Dependencies",
        tool: parsers::NPM_OUTDATED,
        command: "npm outdated",
        loose_command: None,
        fix_command: None,
        enabled_by_default: false,
    },
];

/// Every known tool, in default display order.
pub fn catalogue() -> &'static [CatalogueEntry] {
    &CATALOGUE
}

pub fn catalogue_entry(tool: &str) -> Option<&'static CatalogueEntry> {
    CATALOGUE.iter().find(|entry| entry.tool == tool)
}

impl CatalogueEntry {
    /// Stock definition with the parser from `registry` bound.
    pub fn to_definition(&self, registry: &ParserRegistry) -> TaskDefinition {
        let mut definition = TaskDefinition::new(self.label, self.tool, self.command);
        definition.loose_command = self.loose_command.map(str::to_string);
        definition.fix_command = self.fix_command.map(str::to_string);
        definition.bind_parser(registry)
    }
}

/// Task list used when the project has no config file.
pub fn default_task_definitions(registry: &ParserRegistry) -> Vec<TaskDefinition> {
    CATALOGUE
        .iter()
        .filter(|entry| entry.enabled_by_default)
        .map(|entry| entry.to_definition(registry))
        .collect()
}
