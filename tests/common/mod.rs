#![allow(dead_code)]

use std::sync::Arc;

use is_it_ready::engine::Orchestrator;
use is_it_ready::task::{Task, TaskDefinition};
use is_it_ready::types::RunOptions;
use is_it_ready_test_utils::fake_executor::FakeExecutor;
use is_it_ready_test_utils::recorder::RecordingRenderer;

pub use is_it_ready_test_utils::{init_tracing, with_timeout};

/// Orchestrator wired to a fake executor and a recording renderer.
pub fn orchestrator(
    definitions: Vec<TaskDefinition>,
    executor: &FakeExecutor,
    renderer: &RecordingRenderer,
    options: RunOptions,
) -> Orchestrator {
    let tasks = definitions
        .into_iter()
        .map(|definition| Task::new(definition, &options))
        .collect();
    Orchestrator::new(
        tasks,
        Arc::new(executor.clone()),
        Arc::new(renderer.clone()),
        options,
    )
}
