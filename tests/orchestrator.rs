// tests/orchestrator.rs

mod common;

use std::time::{Duration, Instant};

use is_it_ready::errors::ReadyError;
use is_it_ready::parsers;
use is_it_ready::types::{RunOptions, TaskState};
use is_it_ready_test_utils::builders::{TaskDefinitionBuilder, exit_ok, exit_with};
use is_it_ready_test_utils::fake_executor::FakeExecutor;
use is_it_ready_test_utils::recorder::RecordingRenderer;

use common::{orchestrator, with_timeout};

#[tokio::test]
async fn renders_all_pending_before_anything_starts() {
    common::init_tracing();
    let executor = FakeExecutor::new();
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![
            TaskDefinitionBuilder::new("A", "a").build(),
            TaskDefinitionBuilder::new("B", "b").build(),
        ],
        &executor,
        &renderer,
        RunOptions::default(),
    );

    with_timeout(orch.run()).await.unwrap();

    let states = renderer.states();
    assert_eq!(states[0], vec![TaskState::Pending, TaskState::Pending]);
    // Initial frame plus one per transition (two per task).
    assert_eq!(states.len(), 5);
    assert_eq!(
        states.last().unwrap(),
        &vec![TaskState::Success, TaskState::Success]
    );
}

#[tokio::test]
async fn tasks_run_concurrently() {
    let delay = Duration::from_millis(200);
    let executor = FakeExecutor::new()
        .reply_after("a", exit_ok(""), delay)
        .reply_after("b", exit_ok(""), delay)
        .reply_after("c", exit_ok(""), delay);
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![
            TaskDefinitionBuilder::new("A", "a").build(),
            TaskDefinitionBuilder::new("B", "b").build(),
            TaskDefinitionBuilder::new("C", "c").build(),
        ],
        &executor,
        &renderer,
        RunOptions::default(),
    );

    let started = Instant::now();
    with_timeout(orch.run()).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(executor.max_in_flight(), 3);
    assert!(elapsed < Duration::from_millis(550), "took {elapsed:?}");
}

#[tokio::test]
async fn every_task_starts_before_any_finishes() {
    let executor = FakeExecutor::gated();
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![
            TaskDefinitionBuilder::new("A", "a").build(),
            TaskDefinitionBuilder::new("B", "b").build(),
        ],
        &executor,
        &renderer,
        RunOptions::default(),
    );

    let run = orch.run();
    let release = async {
        while executor.in_flight() < 2 {
            tokio::task::yield_now().await;
        }
        assert_eq!(
            renderer.last_frame().unwrap().iter().map(|r| r.state).collect::<Vec<_>>(),
            vec![TaskState::Running, TaskState::Running]
        );
        executor.release(2);
    };

    let (summary, ()) = with_timeout(async { tokio::join!(run, release) }).await;
    assert!(summary.unwrap().is_clean());
}

#[tokio::test]
async fn aggregates_counts_and_exit_code() {
    let executor = FakeExecutor::new()
        .reply("npx eslint .", exit_with(1, "✖ 5 problems (3 errors, 2 warnings)"))
        .reply("npx vitest run", exit_ok(""))
        .reply("make", exit_with(2, "boom"));
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![
            TaskDefinitionBuilder::new("Linting", "npx eslint .")
                .tool(parsers::ESLINT)
                .with_default_parser()
                .build(),
            TaskDefinitionBuilder::new("Tests", "npx vitest run")
                .tool(parsers::VITEST)
                .with_default_parser()
                .build(),
            TaskDefinitionBuilder::new("Build", "make").build(),
        ],
        &executor,
        &renderer,
        RunOptions::default(),
    );

    let summary = with_timeout(orch.run()).await.unwrap();

    assert_eq!(summary.total_errors, 4);
    assert_eq!(summary.total_warnings, 2);
    assert_eq!(summary.total_issues(), 6);
    assert_eq!(summary.failures.len(), 2);
    assert_eq!(summary.exit_code(), 1);
}

#[tokio::test]
async fn clean_run_exits_zero() {
    let executor = FakeExecutor::new();
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![TaskDefinitionBuilder::new("A", "a").build()],
        &executor,
        &renderer,
        RunOptions::default(),
    );

    let summary = with_timeout(orch.run()).await.unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.exit_code(), 0);
    assert!(summary.failures.is_empty());
}

#[tokio::test]
async fn failures_are_listed_in_completion_order() {
    let executor = FakeExecutor::new()
        .reply_after("slow", exit_with(1, "slow failed"), Duration::from_millis(150))
        .reply_after("fast", exit_with(1, "fast failed"), Duration::from_millis(10));
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![
            TaskDefinitionBuilder::new("Slow", "slow").build(),
            TaskDefinitionBuilder::new("Fast", "fast").build(),
        ],
        &executor,
        &renderer,
        RunOptions::default(),
    );

    let summary = with_timeout(orch.run()).await.unwrap();

    let labels: Vec<&str> = summary.failures.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["Fast", "Slow"]);

    // Display order never changes.
    let last = renderer.last_frame().unwrap();
    assert_eq!(last[0].label, "Slow");
    assert_eq!(last[1].label, "Fast");
}

#[tokio::test]
async fn rerun_resets_tasks_to_pending() {
    let executor = FakeExecutor::new().reply("a", exit_with(1, ""));
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![TaskDefinitionBuilder::new("A", "a").build()],
        &executor,
        &renderer,
        RunOptions::default(),
    );

    with_timeout(orch.run()).await.unwrap();
    let first_run_frames = renderer.frame_count();
    with_timeout(orch.run()).await.unwrap();

    let states = renderer.states();
    assert_eq!(states[first_run_frames], vec![TaskState::Pending]);
    assert_eq!(orch.snapshots()[0].state, TaskState::Failure);
    assert_eq!(executor.call_count(), 2);
}

#[tokio::test]
async fn blank_command_aborts_the_run() {
    let executor = FakeExecutor::new();
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![
            TaskDefinitionBuilder::new("Ok", "a").build(),
            TaskDefinitionBuilder::new("Empty", "").build(),
        ],
        &executor,
        &renderer,
        RunOptions::default(),
    );

    let result = with_timeout(orch.run()).await;

    assert!(matches!(result, Err(ReadyError::EmptyCommand)));
}

#[tokio::test]
async fn executor_errors_do_not_abort_the_run() {
    let executor = FakeExecutor::new().fail("a", "could not spawn");
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![
            TaskDefinitionBuilder::new("A", "a").build(),
            TaskDefinitionBuilder::new("B", "b").build(),
        ],
        &executor,
        &renderer,
        RunOptions::default(),
    );

    let summary = with_timeout(orch.run()).await.unwrap();

    assert_eq!(summary.total_errors, 1);
    let last = renderer.last_frame().unwrap();
    assert_eq!(last[0].state, TaskState::Failure);
    assert_eq!(last[0].message, "Failed - could not spawn");
    assert_eq!(last[1].state, TaskState::Success);
}
