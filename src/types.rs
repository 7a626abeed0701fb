// src/types.rs

//! Value types shared by the executor, tasks, orchestrator and renderer.

use std::fmt;
use std::path::PathBuf;

/// Resolved run modes. Immutable for the lifetime of a process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Prefer each task's auto-correcting command when it has one.
    pub is_fix_mode: bool,
    /// Prefer each task's permissive command when it has one.
    pub is_loose_mode: bool,
    /// Replace per-failure output with a one-line hint.
    pub is_silent_mode: bool,
    /// Rerun all checks on filesystem changes.
    pub is_watch_mode: bool,
    /// Explicit config file; opaque to the core.
    pub config_path: Option<PathBuf>,
}

/// Lifecycle of a task within one `execute()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    Pending,
    Running,
    Success,
    Failure,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Success | TaskState::Failure)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskState::Pending => "pending",
            TaskState::Running => "running",
            TaskState::Success => "success",
            TaskState::Failure => "failure",
        };
        f.write_str(s)
    }
}

/// Structured classification of a tool's output.
///
/// A parser returning `None` means the output shows no tool-specific
/// failure; the exit status still decides the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFailure {
    pub message: String,
    pub errors: Option<u32>,
    pub warnings: Option<u32>,
}

impl ParsedFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            warnings: None,
        }
    }

    pub fn with_errors(mut self, errors: u32) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_warnings(mut self, warnings: u32) -> Self {
        self.warnings = Some(warnings);
        self
    }

    /// Shorthand for the common "N things wrong" outcome.
    pub fn errors(message: impl Into<String>, errors: u32) -> Self {
        Self::new(message).with_errors(errors)
    }
}

/// Everything needed to explain one failed task after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetails {
    pub label: String,
    pub tool: String,
    pub command: String,
    /// ANSI-stripped, trimmed combined output.
    pub output: String,
    /// Combined output as the tool produced it.
    pub raw_output: String,
    pub errors: Option<u32>,
    pub warnings: Option<u32>,
    pub summary: Option<String>,
}

/// Outcome of running one shell command to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// stdout followed by stderr, skipping empty streams.
    pub fn combined_output(&self) -> String {
        [self.stdout.as_str(), self.stderr.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
