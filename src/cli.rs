// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::RunOptions;

/// Command-line arguments for `is-it-ready`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "is-it-ready",
    version,
    about = "Run every project check at once and show a live summary.",
    long_about = None
)]
pub struct CliArgs {
    /// Run each tool's auto-fix command where one is configured.
    #[arg(long)]
    pub fix: bool,

    /// Run each tool's permissive command where one is configured.
    #[arg(long)]
    pub loose: bool,

    /// Only show the summary table; skip the failure details.
    #[arg(long)]
    pub silent: bool,

    /// Keep running and rerun all checks when files change.
    #[arg(long)]
    pub watch: bool,

    /// Path to a config file (TOML).
    ///
    /// Default: `.is-it-ready.toml` or `is-it-ready.toml` in the current
    /// directory, falling back to the bundled checks.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `IS_IT_READY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate the config, print the resolved checks, but don't
    /// execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    /// Run modes derived from the flags.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            is_fix_mode: self.fix,
            is_loose_mode: self.loose,
            is_silent_mode: self.silent,
            is_watch_mode: self.watch,
            config_path: self.config.clone(),
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
