// src/engine/orchestrator.rs

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::CommandExecutor;
use crate::render::{Renderer, TaskView};
use crate::task::{ExecuteHooks, Task, TaskSnapshot};
use crate::types::RunOptions;

use super::summary::RunSummary;

/// Runs a fixed, ordered list of tasks to completion concurrently.
///
/// List order is display order only. The orchestrator owns the latest
/// snapshot of every task; each transition replaces one snapshot and redraws
/// the whole list so observers always see a consistent picture.
pub struct Orchestrator {
    tasks: Vec<Task>,
    executor: Arc<dyn CommandExecutor>,
    renderer: Arc<dyn Renderer>,
    options: RunOptions,
    board: Mutex<Vec<TaskSnapshot>>,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("tasks", &self.tasks)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn new(
        tasks: Vec<Task>,
        executor: Arc<dyn CommandExecutor>,
        renderer: Arc<dyn Renderer>,
        options: RunOptions,
    ) -> Self {
        let board = Mutex::new(vec![TaskSnapshot::pending(); tasks.len()]);
        Self {
            tasks,
            executor,
            renderer,
            options,
            board,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Copy of the current snapshot of every task, in list order.
    pub fn snapshots(&self) -> Vec<TaskSnapshot> {
        self.lock_board().clone()
    }

    /// Run every task once and aggregate the result.
    ///
    /// Renders once before anything starts and again on every task
    /// transition. Task outcomes never make this fail; only a task that
    /// cannot be started at all (a blank command) aborts the run.
    pub async fn run(&self) -> Result<RunSummary> {
        info!(tasks = self.tasks.len(), "starting checks");

        {
            let mut board = self.lock_board();
            board.iter_mut().for_each(|snap| *snap = TaskSnapshot::pending());
            self.render_locked(&board);
        }

        let executor = self.executor.as_ref();
        let runs = self.tasks.iter().enumerate().map(|(idx, task)| {
            let redraw = move |snapshot: &TaskSnapshot| self.record(idx, snapshot);
            async move { task.execute(executor, ExecuteHooks::both(&redraw)).await }
        });

        let settled = join_all(runs)
            .await
            .into_iter()
            .collect::<Result<Vec<TaskSnapshot>>>()?;

        let summary = RunSummary::from_snapshots(&settled);
        info!(
            errors = summary.total_errors,
            warnings = summary.total_warnings,
            failed_tasks = summary.failures.len(),
            "checks finished"
        );
        Ok(summary)
    }

    /// Replace one task's snapshot and redraw everything.
    fn record(&self, idx: usize, snapshot: &TaskSnapshot) {
        let mut board = self.lock_board();
        if let Some(slot) = board.get_mut(idx) {
            debug!(task = %self.tasks[idx].label(), state = %snapshot.state, "task transition");
            *slot = snapshot.clone();
        }
        self.render_locked(&board);
    }

    /// Draw the list while the board lock is held, so frames never interleave.
    fn render_locked(&self, board: &[TaskSnapshot]) {
        let views: Vec<TaskView<'_>> = self
            .tasks
            .iter()
            .zip(board.iter())
            .map(|(task, snapshot)| TaskView::new(task, snapshot))
            .collect();
        self.renderer.render(&views, &self.options);
    }

    fn lock_board(&self) -> MutexGuard<'_, Vec<TaskSnapshot>> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
