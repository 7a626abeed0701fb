// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::task::TaskDefinition;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// watch_ignore = ["**/node_modules/**", "**/.git/**", "dist/**"]
///
/// [[task]]
/// tool = "ESLint"
/// command = "npm run lint"
/// loose_command = "npm run lint -- --quiet"
/// fix_command = "npm run lint -- --fix"
///
/// [[task]]
/// tool = "Vitest"
/// command = "npm test"
/// ```
///
/// Task order in the file is display order.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Globs (relative to the project root) whose changes never trigger a
    /// rerun in watch mode. Replaces the built-in list when present.
    #[serde(default)]
    pub watch_ignore: Option<Vec<String>>,

    /// All tasks from `[[task]]` tables.
    #[serde(default, rename = "task")]
    pub tasks: Vec<UserTaskConfig>,
}

/// One `[[task]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct UserTaskConfig {
    /// Catalogue identifier, e.g. `"ESLint"` or `"npm audit"`.
    pub tool: String,

    /// Command run in the default mode.
    pub command: String,

    /// Command run with `--loose`, if the tool has a permissive variant.
    #[serde(default)]
    pub loose_command: Option<String>,

    /// Command run with `--fix`, if the tool can auto-correct.
    #[serde(default)]
    pub fix_command: Option<String>,

    /// Overrides the catalogue label.
    #[serde(default)]
    pub label: Option<String>,
}

/// Where the resolved task list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Everything the rest of the program needs from configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub tasks: Vec<TaskDefinition>,
    pub watch_ignore: Option<Vec<String>>,
    pub source: ConfigSource,
}
