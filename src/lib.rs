// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod parsers;
pub mod render;
pub mod task;
pub mod types;
pub mod watch;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigSource, ResolvedConfig, resolve_config};
use crate::engine::Orchestrator;
use crate::exec::ShellExecutor;
use crate::parsers::ParserRegistry;
use crate::render::TableRenderer;
use crate::task::Task;
use crate::types::RunOptions;
use crate::watch::{IgnoreSet, WatchLoop};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution and the parser registry
/// - tasks, the shell executor and the table renderer
/// - the orchestrator, run once or under the watch loop
/// - Ctrl-C / SIGTERM handling in watch mode
///
/// Returns the process exit code: 0 when every check came back clean,
/// 1 otherwise.
pub async fn run(args: CliArgs) -> Result<i32> {
    let options = args.run_options();
    let root = project_root();

    let registry = ParserRegistry::with_defaults();
    let resolved = resolve_config(&options, &root, &registry)?;

    if args.dry_run {
        print_dry_run(&resolved, &options);
        return Ok(0);
    }

    let tasks: Vec<Task> = resolved
        .tasks
        .iter()
        .cloned()
        .map(|definition| Task::new(definition, &options))
        .collect();

    let orchestrator = Arc::new(Orchestrator::new(
        tasks,
        Arc::new(ShellExecutor::new()),
        Arc::new(TableRenderer::new()),
        options.clone(),
    ));

    if !options.is_watch_mode {
        let summary = orchestrator.run().await?;
        return Ok(summary.exit_code());
    }

    // Handlers go in before the first run so an early Ctrl-C is ours.
    let shutdown = shutdown_signal().context("installing signal handlers")?;

    let ignore = IgnoreSet::from_config(resolved.watch_ignore.as_deref())
        .context("compiling watch ignore patterns")?;

    let watch_loop = WatchLoop::new(orchestrator);
    info!(root = %root.display(), "watching for changes");
    let code = watch_loop.watch(root, ignore, shutdown).await?;
    debug!(code, "watch loop stopped");
    Ok(code)
}

fn project_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Install the interrupt and terminate handlers now and return a future
/// that resolves on the first of them.
#[cfg(unix)]
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => debug!("received SIGINT"),
            _ = terminate.recv() => debug!("received SIGTERM"),
        }
    })
}

#[cfg(not(unix))]
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c()?;
    Ok(async move {
        ctrl_c.recv().await;
        debug!("received Ctrl-C");
    })
}

/// Print the resolved checks and the command each one would run.
fn print_dry_run(resolved: &ResolvedConfig, options: &RunOptions) {
    println!("is-it-ready dry-run");
    match &resolved.source {
        ConfigSource::File(path) => println!("  config = {}", path.display()),
        ConfigSource::Defaults => println!("  config = (bundled defaults)"),
    }
    println!(
        "  modes = fix: {}, loose: {}, silent: {}, watch: {}",
        options.is_fix_mode, options.is_loose_mode, options.is_silent_mode, options.is_watch_mode
    );
    if let Some(ignore) = &resolved.watch_ignore {
        println!("  watch_ignore = {ignore:?}");
    }
    println!();

    println!("checks ({}):", resolved.tasks.len());
    for definition in &resolved.tasks {
        let task = Task::new(definition.clone(), options);
        println!("  - {} ({})", task.label(), task.tool());
        println!("      cmd: {}", task.command());
        if let Some(loose) = &definition.loose_command {
            println!("      loose: {loose}");
        }
        if let Some(fix) = &definition.fix_command {
            println!("      fix: {fix}");
        }
    }

    debug!("dry-run complete (no execution)");
}
