// src/task/snapshot.rs

use std::time::{Duration, Instant};

use crate::errors::Result;
use crate::exec::strip_ansi;
use crate::types::{CommandResult, FailureDetails, ParsedFailure, TaskState};

use super::Task;

/// Message shown when the exit status failed but the parser found nothing.
pub const GENERIC_FAILURE: &str = "Failed - see output below for details";
pub const RUNNING_MESSAGE: &str = "Running...";
pub const PASSED_MESSAGE: &str = "Passed";

/// Immutable view of one task at a point in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub state: TaskState,
    pub message: String,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    /// Present only in the `failure` state.
    pub failure: Option<FailureDetails>,
    pub errors: u32,
    pub warnings: u32,
}

impl TaskSnapshot {
    pub fn pending() -> Self {
        Self::default()
    }

    pub(crate) fn running(started_at: Instant) -> Self {
        Self {
            state: TaskState::Running,
            message: RUNNING_MESSAGE.to_string(),
            started_at: Some(started_at),
            ..Self::default()
        }
    }

    /// Elapsed time of a finished run.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end.saturating_duration_since(start)),
            _ => None,
        }
    }

    pub fn issues(&self) -> u32 {
        self.errors.saturating_add(self.warnings)
    }

    /// Terminal snapshot for a running task given the executor's outcome.
    ///
    /// Success requires exit status 0 *and* no parsed failure. Executor
    /// errors become a failure carrying the error text as summary and output.
    pub(crate) fn complete(
        &self,
        task: &Task,
        outcome: Result<CommandResult>,
        finished_at: Instant,
    ) -> Self {
        let base = Self {
            started_at: self.started_at,
            finished_at: Some(finished_at),
            ..Self::default()
        };

        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                let text = err.to_string();
                return Self {
                    state: TaskState::Failure,
                    message: format!("Failed - {text}"),
                    failure: Some(FailureDetails {
                        label: task.label().to_string(),
                        tool: task.tool().to_string(),
                        command: task.command().to_string(),
                        output: text.clone(),
                        raw_output: text.clone(),
                        errors: None,
                        warnings: None,
                        summary: Some(text),
                    }),
                    errors: 1,
                    warnings: 0,
                    ..base
                };
            }
        };

        let raw_output = result.combined_output();
        let stripped = strip_ansi(&raw_output);
        let parsed = task.definition().classify(&stripped);

        if result.success() && parsed.is_none() {
            return Self {
                state: TaskState::Success,
                message: PASSED_MESSAGE.to_string(),
                ..base
            };
        }

        let (errors, warnings) = issue_counts(parsed.as_ref());
        let message = parsed
            .as_ref()
            .map(|p| p.message.clone())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());

        Self {
            state: TaskState::Failure,
            message,
            failure: Some(FailureDetails {
                label: task.label().to_string(),
                tool: task.tool().to_string(),
                command: task.command().to_string(),
                output: stripped.trim().to_string(),
                raw_output,
                errors: parsed.as_ref().and_then(|p| p.errors),
                warnings: parsed.as_ref().and_then(|p| p.warnings),
                summary: parsed.map(|p| p.message),
            }),
            errors,
            warnings,
            ..base
        }
    }
}

/// Error/warning contribution of one failed task.
///
/// A failure with nothing parsed, or with both counts absent or zero,
/// counts as exactly one error. Otherwise errors and warnings are taken as
/// reported, so a warnings-only failure adds no errors.
pub fn issue_counts(parsed: Option<&ParsedFailure>) -> (u32, u32) {
    let Some(parsed) = parsed else {
        return (1, 0);
    };

    let errors = parsed.errors.unwrap_or(0);
    let warnings = parsed.warnings.unwrap_or(0);
    if errors == 0 && warnings == 0 {
        (1, 0)
    } else {
        (errors, warnings)
    }
}
