// src/exec/command.rs

use std::process::Stdio;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{ReadyError, Result};
use crate::types::CommandResult;

/// Package-script invocations that accept `--silent`, at the start of the
/// command or after a shell separator (`cd web && npm run lint`).
static PACKAGE_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[\s;&|(])(npm|pnpm)\s+(run|run-script)(\s|$)").expect("package script regex")
});

/// Short flags that already ask the package manager to stay quiet. Any
/// token starting with `--silent` or `--loglevel=silent` counts as well.
const QUIET_SHORT_FLAGS: [&str; 1] = ["-s"];

/// Environment forced on every child so tools keep colouring (and the
/// ANSI stripper sees the same output) when stdout is not a TTY. Values
/// already present in the parent environment win.
const COLOR_ENV: [(&str, &str); 2] = [("FORCE_COLOR", "1"), ("npm_config_color", "always")];

/// Validate and normalise a command before it is handed to the shell.
///
/// Returns `ReadyError::EmptyCommand` for blank input; otherwise the trimmed
/// command with [`add_silent_flag`] applied.
pub fn prepare_command(command: &str) -> Result<String> {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Err(ReadyError::EmptyCommand);
    }
    Ok(add_silent_flag(trimmed))
}

/// Insert `--silent` after the verb of `npm run` / `pnpm run` (or
/// `run-script`) so only the tool's own output is captured.
///
/// Every package-script invocation in a chained command is rewritten.
/// Commands without one, or that already carry a quiet flag anywhere, are
/// returned unchanged, so applying this twice yields the same string as
/// applying it once.
pub fn add_silent_flag(command: &str) -> String {
    if !PACKAGE_SCRIPT.is_match(command) || has_quiet_flag(command) {
        return command.to_string();
    }

    PACKAGE_SCRIPT
        .replace_all(command, "${1}${2} ${3} --silent${4}")
        .into_owned()
}

fn has_quiet_flag(command: &str) -> bool {
    command.split_whitespace().any(|token| {
        token.starts_with("--silent")
            || token.starts_with("--loglevel=silent")
            || QUIET_SHORT_FLAGS.contains(&token)
    })
}

/// Run a prepared command through the platform shell and wait for it.
///
/// A non-zero exit is a normal outcome and is reported in the returned
/// `CommandResult`; only failing to spawn or to collect output is an error.
pub async fn run_shell(command: &str) -> Result<CommandResult> {
    info!(cmd = %command, "starting check process");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };

    for (key, default) in COLOR_ENV {
        if std::env::var_os(key).is_none() {
            cmd.env(key, default);
        }
    }

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd
        .spawn()
        .with_context(|| format!("spawning process for command '{command}'"))?;

    let output = child
        .wait_with_output()
        .await
        .with_context(|| format!("collecting output of command '{command}'"))?;

    let status = output.status.code();
    debug!(
        cmd = %command,
        exit_code = ?status,
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "check process exited"
    );

    Ok(CommandResult {
        status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
