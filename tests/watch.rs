// tests/watch.rs

mod common;

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use is_it_ready::types::RunOptions;
use is_it_ready::watch::{IgnoreSet, SingleFlight, WatchLoop, is_change_event, relative_str};
use is_it_ready_test_utils::builders::{TaskDefinitionBuilder, exit_with};
use is_it_ready_test_utils::fake_executor::FakeExecutor;
use is_it_ready_test_utils::recorder::RecordingRenderer;
use notify::EventKind;
use notify::event::{AccessKind, CreateKind, ModifyKind};
use tokio::sync::oneshot;

use common::{orchestrator, with_timeout};

fn watch_loop(executor: &FakeExecutor) -> WatchLoop {
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![TaskDefinitionBuilder::new("A", "a").build()],
        executor,
        &renderer,
        RunOptions {
            is_watch_mode: true,
            ..RunOptions::default()
        },
    );
    WatchLoop::new(Arc::new(orch))
}

async fn wait_for_calls(executor: &FakeExecutor, n: usize) {
    while executor.call_count() < n {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[test]
fn single_flight_hands_out_one_permit() {
    let guard = SingleFlight::new();

    let permit = guard.try_acquire().expect("slot free");
    assert!(guard.is_in_flight());
    assert!(guard.try_acquire().is_none());

    drop(permit);
    assert!(!guard.is_in_flight());
    assert!(guard.try_acquire().is_some());
}

#[tokio::test]
async fn changes_during_a_run_are_dropped() {
    common::init_tracing();
    let executor = FakeExecutor::gated();
    let wl = watch_loop(&executor);

    let first = wl.request_run().expect("first run starts");
    assert!(wl.is_running());
    assert!(wl.request_run().is_none());
    assert!(wl.request_run().is_none());

    executor.release(1);
    with_timeout(first).await.unwrap();

    assert!(!wl.is_running());
    assert_eq!(executor.call_count(), 1);

    let second = wl.request_run().expect("next change after the run starts one more");
    executor.release(1);
    with_timeout(second).await.unwrap();
    assert_eq!(executor.call_count(), 2);
}

#[tokio::test]
async fn exit_code_tracks_the_last_completed_run() {
    let executor = FakeExecutor::new().reply("a", exit_with(1, ""));
    let wl = watch_loop(&executor);

    assert_eq!(wl.exit_code(), 0);
    with_timeout(wl.run_once()).await.unwrap();

    assert_eq!(wl.last_issue_count(), 1);
    assert_eq!(wl.exit_code(), 1);
}

#[tokio::test]
async fn guard_is_released_after_a_fatal_run() {
    let executor = FakeExecutor::new();
    let renderer = RecordingRenderer::new();
    let orch = orchestrator(
        vec![TaskDefinitionBuilder::new("Empty", " ").build()],
        &executor,
        &renderer,
        RunOptions::default(),
    );
    let wl = WatchLoop::new(Arc::new(orch));

    assert!(with_timeout(wl.run_once()).await.is_err());
    assert!(!wl.is_running());
}

#[tokio::test]
async fn shutdown_returns_last_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let executor = FakeExecutor::new().reply("a", exit_with(1, ""));
    let wl = watch_loop(&executor);
    with_timeout(wl.run_once()).await.unwrap();

    let ignore = IgnoreSet::defaults().unwrap();
    let code = with_timeout(wl.watch(dir.path(), ignore, async {})).await.unwrap();

    assert_eq!(code, 1);
}

#[tokio::test]
async fn shutdown_does_not_wait_for_the_run_in_flight() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let executor = FakeExecutor::gated().reply("a", exit_with(1, ""));
    let wl = watch_loop(&executor);

    executor.release(1);
    with_timeout(wl.run_once()).await.unwrap();
    assert_eq!(wl.exit_code(), 1);

    let in_flight = wl.request_run().expect("second run starts");
    while executor.in_flight() < 1 {
        tokio::task::yield_now().await;
    }

    let ignore = IgnoreSet::defaults().unwrap();
    let code = with_timeout(wl.watch(dir.path(), ignore, async {})).await.unwrap();

    assert_eq!(code, 1);
    assert!(!in_flight.is_finished());
    assert_eq!(executor.in_flight(), 1);
    // The initial run inside `watch` was dropped because one was in flight.
    assert_eq!(executor.call_count(), 2);
}

#[tokio::test]
async fn signal_during_the_initial_run_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let executor = FakeExecutor::gated();
    let wl = watch_loop(&executor);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let ignore = IgnoreSet::defaults().unwrap();

    let watching = wl.watch(dir.path().to_path_buf(), ignore, async {
        let _ = stop_rx.await;
    });
    let interrupt = async {
        wait_for_calls(&executor, 1).await;
        let _ = stop_tx.send(());
    };

    let (code, ()) = with_timeout(async { tokio::join!(watching, interrupt) }).await;
    assert_eq!(code.unwrap(), 0);
    assert_eq!(executor.in_flight(), 1);
}

#[tokio::test]
async fn file_change_triggers_a_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let executor = FakeExecutor::new();
    let wl = watch_loop(&executor);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let ignore = IgnoreSet::defaults().unwrap();
    let root = dir.path().to_path_buf();

    let watching = wl.watch(root.clone(), ignore, async {
        let _ = stop_rx.await;
    });
    let poke = async {
        wait_for_calls(&executor, 1).await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        fs::write(root.join("index.ts"), "export {}\n").unwrap();
        wait_for_calls(&executor, 2).await;
        let _ = stop_tx.send(());
    };

    let (code, ()) = with_timeout(async { tokio::join!(watching, poke) }).await;
    assert_eq!(code.unwrap(), 0);
    assert!(executor.call_count() >= 2);
}

#[tokio::test]
async fn changes_under_ignored_dirs_do_not_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let modules = dir.path().join("node_modules").join("left-pad");
    fs::create_dir_all(&modules).unwrap();

    let executor = FakeExecutor::new();
    let wl = watch_loop(&executor);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let ignore = IgnoreSet::defaults().unwrap();

    let watching = wl.watch(dir.path().to_path_buf(), ignore, async {
        let _ = stop_rx.await;
    });
    let poke = async {
        wait_for_calls(&executor, 1).await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        fs::write(modules.join("index.js"), "module.exports = 1;\n").unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        let _ = stop_tx.send(());
    };

    let (code, ()) = with_timeout(async { tokio::join!(watching, poke) }).await;
    assert_eq!(code.unwrap(), 0);
    assert_eq!(executor.call_count(), 1);
}

#[test]
fn default_ignores_cover_vcs_and_dependencies() {
    let ignore = IgnoreSet::defaults().unwrap();

    assert!(ignore.is_ignored("node_modules/react/index.js"));
    assert!(ignore.is_ignored("packages/app/node_modules/x/y.js"));
    assert!(ignore.is_ignored(".git/HEAD"));
    assert!(!ignore.is_ignored("src/index.ts"));
}

#[test]
fn configured_ignores_replace_defaults() {
    let patterns = vec!["dist/**".to_string()];
    let ignore = IgnoreSet::from_config(Some(patterns.as_slice())).unwrap();

    assert!(ignore.is_ignored("dist/bundle.js"));
    assert!(!ignore.is_ignored("node_modules/react/index.js"));
    assert_eq!(ignore.patterns(), &["dist/**".to_string()]);
}

#[test]
fn invalid_ignore_pattern_is_an_error() {
    assert!(IgnoreSet::new(&["src/[unclosed"][..]).is_err());
}

#[test]
fn relative_paths_use_forward_slashes() {
    let root = std::path::Path::new("/project");
    let path = root.join("src").join("main.ts");

    assert_eq!(relative_str(root, &path).as_deref(), Some("src/main.ts"));
    assert_eq!(relative_str(root, std::path::Path::new("/elsewhere/x")), None);
}

#[test]
fn reads_are_not_changes() {
    assert!(!is_change_event(&EventKind::Access(AccessKind::Any)));
    assert!(is_change_event(&EventKind::Create(CreateKind::File)));
    assert!(is_change_event(&EventKind::Modify(ModifyKind::Any)));
    assert!(is_change_event(&EventKind::Any));
}
