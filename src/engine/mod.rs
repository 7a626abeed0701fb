// src/engine/mod.rs

//! Orchestration engine for is-it-ready.
//!
//! This module ties together:
//! - the ordered task list and the latest snapshot of each task
//! - concurrent execution of every task through a `CommandExecutor`
//! - a full redraw through the `Renderer` on every state transition
//! - aggregation of error/warning counts into a [`RunSummary`]
//!
//! Concurrency is cooperative: all task futures are polled on the caller's
//! task and parallelism comes from the child processes themselves.

pub mod orchestrator;
pub mod summary;

pub use orchestrator::Orchestrator;
pub use summary::{RunSummary, failures_in_completion_order};
