use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::Semaphore;

use is_it_ready::errors::ReadyError;
use is_it_ready::exec::{CommandExecutor, ExecFuture};
use is_it_ready::types::CommandResult;

use crate::builders::exit_ok;

#[derive(Clone)]
enum Reply {
    Result(CommandResult),
    Error(String),
}

#[derive(Clone)]
struct Script {
    reply: Reply,
    delay: Duration,
}

/// A fake executor that:
/// - records every command it was asked to run, in call order
/// - answers with a scripted result per command (exit 0, no output otherwise)
/// - can delay replies, or hold them until the test opens a gate
/// - tracks how many commands were in flight at the same time
#[derive(Clone, Default)]
pub struct FakeExecutor {
    scripts: Arc<Mutex<HashMap<String, Script>>>,
    calls: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every run until [`FakeExecutor::release`] is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub fn reply(self, command: &str, result: CommandResult) -> Self {
        self.script(command, Reply::Result(result), Duration::ZERO)
    }

    pub fn reply_after(self, command: &str, result: CommandResult, delay: Duration) -> Self {
        self.script(command, Reply::Result(result), delay)
    }

    /// Make `command` fail inside the executor, as if the spawn failed.
    pub fn fail(self, command: &str, message: &str) -> Self {
        self.script(command, Reply::Error(message.to_string()), Duration::ZERO)
    }

    fn script(self, command: &str, reply: Reply, delay: Duration) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(command.to_string(), Script { reply, delay });
        self
    }

    /// Let `n` held runs proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of commands observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl CommandExecutor for FakeExecutor {
    fn run<'a>(&'a self, command: &'a str) -> ExecFuture<'a> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(command.to_string());

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            let script = self.scripts.lock().unwrap().get(command).cloned();

            if let Some(gate) = &self.gate {
                gate.acquire().await.expect("gate closed").forget();
            }

            let script = script.unwrap_or(Script {
                reply: Reply::Result(exit_ok("")),
                delay: Duration::ZERO,
            });
            if !script.delay.is_zero() {
                tokio::time::sleep(script.delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match script.reply {
                Reply::Result(result) => Ok(result),
                Reply::Error(message) => Err(ReadyError::Other(anyhow!(message))),
            }
        })
    }
}
