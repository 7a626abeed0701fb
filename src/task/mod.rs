// src/task/mod.rs

//! One quality check: its immutable definition, the command it resolves to
//! for the current run modes, and the snapshots produced by executing it.
//!
//! A [`Task`] never holds mutable run state. Each call to
//! [`Task::execute`] produces a fresh [`TaskSnapshot`]; the orchestrator
//! keeps the latest snapshot per task for rendering and aggregation.

pub mod definition;
pub mod snapshot;

pub use definition::{CommandVariant, ExecutableCommand, TaskDefinition, select_command};
pub use snapshot::{TaskSnapshot, issue_counts};

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::errors::{ReadyError, Result};
use crate::exec::CommandExecutor;
use crate::types::RunOptions;

/// Redraw callback invoked with the task's newest snapshot.
pub type SnapshotHook<'a> = &'a (dyn Fn(&TaskSnapshot) + Send + Sync);

/// Optional callbacks for [`Task::execute`].
///
/// `on_start` fires right after the task enters `running`; `on_finish`
/// right after it reaches a terminal state. They exist to trigger redraws.
#[derive(Default, Clone, Copy)]
pub struct ExecuteHooks<'a> {
    pub on_start: Option<SnapshotHook<'a>>,
    pub on_finish: Option<SnapshotHook<'a>>,
}

impl<'a> ExecuteHooks<'a> {
    /// Use the same callback for both transitions.
    pub fn both(hook: SnapshotHook<'a>) -> Self {
        Self {
            on_start: Some(hook),
            on_finish: Some(hook),
        }
    }

    fn started(&self, snapshot: &TaskSnapshot) {
        if let Some(hook) = self.on_start {
            hook(snapshot);
        }
    }

    fn finished(&self, snapshot: &TaskSnapshot) {
        if let Some(hook) = self.on_finish {
            hook(snapshot);
        }
    }
}

/// Runtime unit for one check.
#[derive(Clone)]
pub struct Task {
    definition: TaskDefinition,
    effective: ExecutableCommand,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("label", &self.effective.label)
            .field("tool", &self.definition.tool)
            .field("command", &self.effective.command)
            .field("variant", &self.effective.variant)
            .finish()
    }
}

impl Task {
    /// Resolve the effective label and command for `options`.
    pub fn new(definition: TaskDefinition, options: &RunOptions) -> Self {
        let effective = select_command(&definition, options);
        Self {
            definition,
            effective,
        }
    }

    /// Display label; suffixed with `*` when a loose or fix variant runs.
    pub fn label(&self) -> &str {
        &self.effective.label
    }

    pub fn tool(&self) -> &str {
        &self.definition.tool
    }

    /// The command this task will hand to the executor.
    pub fn command(&self) -> &str {
        &self.effective.command
    }

    pub fn variant(&self) -> CommandVariant {
        self.effective.variant
    }

    pub fn definition(&self) -> &TaskDefinition {
        &self.definition
    }

    /// Run the check once.
    ///
    /// Moves `pending → running → {success, failure}`, calling the hooks on
    /// each transition, and returns the terminal snapshot. Every call starts
    /// from a clean slate, so the task can be executed again in watch mode.
    ///
    /// A blank effective command is rejected with `ReadyError::EmptyCommand`
    /// before anything is spawned or any hook fires. Every other executor
    /// error is recorded as a failed run and never escapes.
    pub async fn execute(
        &self,
        executor: &dyn CommandExecutor,
        hooks: ExecuteHooks<'_>,
    ) -> Result<TaskSnapshot> {
        if self.command().trim().is_empty() {
            return Err(ReadyError::EmptyCommand);
        }

        let running = TaskSnapshot::running(Instant::now());
        debug!(task = %self.label(), cmd = %self.command(), "task running");
        hooks.started(&running);

        let outcome = executor.run(self.command()).await;
        let finished_at = Instant::now();

        if let Err(err) = &outcome {
            warn!(task = %self.label(), error = %err, "executor failed; recording as task failure");
        }

        let finished = running.complete(self, outcome, finished_at);
        info!(
            task = %self.label(),
            state = %finished.state,
            errors = finished.errors,
            warnings = finished.warnings,
            "task finished"
        );
        hooks.finished(&finished);

        Ok(finished)
    }
}
