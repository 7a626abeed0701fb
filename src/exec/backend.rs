// src/exec/backend.rs

//! Pluggable command executor abstraction.
//!
//! Tasks talk to a `CommandExecutor` instead of spawning processes directly.
//! This makes it easy to swap in a fake executor in tests while keeping the
//! production implementation in [`super::command`].
//!
//! - `ShellExecutor` is the default implementation used by `is-it-ready`.
//!   It runs the command through the platform shell.
//! - Tests can provide their own `CommandExecutor` that, for example, records
//!   which commands were requested and returns scripted output.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::types::CommandResult;

use super::command::{prepare_command, run_shell};

/// Boxed future returned by [`CommandExecutor::run`].
pub type ExecFuture<'a> = Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>>;

/// Trait abstracting how a single command is executed.
///
/// Implementations must:
/// - resolve to `Ok` for every process that ran, whatever its exit status
/// - spawn at most one process per call and never retry
/// - reject a blank command with `ReadyError::EmptyCommand`
pub trait CommandExecutor: Send + Sync {
    fn run<'a>(&'a self, command: &'a str) -> ExecFuture<'a>;
}

/// Real executor used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ShellExecutor {
    fn run<'a>(&'a self, command: &'a str) -> ExecFuture<'a> {
        // Validation happens before the future exists so a blank command
        // never reaches the spawn path.
        let prepared = prepare_command(command);

        Box::pin(async move {
            let command = prepared?;
            run_shell(&command).await
        })
    }
}
