// src/render/mod.rs

//! Presentation of the task list.
//!
//! The engine only knows the [`Renderer`] call contract: it calls
//! `render(tasks, options)` with the full current list on every transition.
//! Renderers must be synchronous, must not panic, and must tolerate tasks
//! finishing in any order.

pub mod table;

use std::time::Duration;

use crate::task::{Task, TaskSnapshot};
use crate::types::{RunOptions, TaskState};

pub use table::TableRenderer;

/// What a renderer sees of one task.
#[derive(Debug, Clone, Copy)]
pub struct TaskView<'a> {
    pub label: &'a str,
    pub tool: &'a str,
    pub command: &'a str,
    pub snapshot: &'a TaskSnapshot,
}

impl<'a> TaskView<'a> {
    pub fn new(task: &'a Task, snapshot: &'a TaskSnapshot) -> Self {
        Self {
            label: task.label(),
            tool: task.tool(),
            command: task.command(),
            snapshot,
        }
    }

    pub fn state(&self) -> TaskState {
        self.snapshot.state
    }
}

pub trait Renderer: Send + Sync {
    fn render(&self, tasks: &[TaskView<'_>], options: &RunOptions);
}

/// `"850 ms"` below one second, `"1.3 s"` otherwise; empty when unknown.
pub fn format_duration(duration: Option<Duration>) -> String {
    match duration {
        None => String::new(),
        Some(d) if d < Duration::from_secs(1) => format!("{} ms", d.as_millis()),
        Some(d) => format!("{:.1} s", d.as_secs_f64()),
    }
}

/// True once every task has reached `success` or `failure`.
pub fn all_settled(tasks: &[TaskView<'_>]) -> bool {
    tasks.iter().all(|t| t.state().is_terminal())
}

/// Wall-clock span from the earliest start to the latest finish.
pub fn overall_duration(tasks: &[TaskView<'_>]) -> Option<Duration> {
    let start = tasks.iter().filter_map(|t| t.snapshot.started_at).min()?;
    let end = tasks.iter().filter_map(|t| t.snapshot.finished_at).max()?;
    Some(end.saturating_duration_since(start))
}
