// src/watch/mod.rs

//! Watch mode.
//!
//! This module is responsible for:
//! - Compiling the ignore glob set applied to filesystem events.
//! - Wiring up a cross-platform recursive filesystem watcher (`notify`).
//! - Rerunning the orchestrator on change, at most one run at a time.
//!
//! It does **not** know which tool cares about which file; any relevant
//! change reruns every check.

pub mod guard;
pub mod patterns;
pub mod watcher;

pub use guard::{FlightPermit, SingleFlight};
pub use patterns::{DEFAULT_IGNORE, IgnoreSet, relative_str};
pub use watcher::{WatchLoop, is_change_event};
