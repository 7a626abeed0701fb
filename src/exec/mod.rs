// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the commands configured
//! for each check, using `tokio::process::Command`, and handing the captured
//! output back to the task that asked for it.
//!
//! - [`backend`] provides the `CommandExecutor` trait and the production
//!   `ShellExecutor`; tests substitute a fake that never spawns processes.
//! - [`command`] holds command preparation (validation, quiet-flag rewrite)
//!   and the actual shell spawn.
//! - [`ansi`] strips terminal escape sequences before output is classified.

pub mod ansi;
pub mod backend;
pub mod command;

pub use ansi::strip_ansi;
pub use backend::{CommandExecutor, ExecFuture, ShellExecutor};
pub use command::{add_silent_flag, prepare_command, run_shell};
