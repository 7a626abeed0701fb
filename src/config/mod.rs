// src/config/mod.rs

//! Configuration loading and validation for is-it-ready.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Provide the bundled catalogue of known tools (`defaults.rs`).
//! - Find and load a config file from disk (`loader.rs`).
//! - Validate it and merge it with the catalogue (`validate.rs`).
//!
//! The engine never sees any of this: it receives the resolved, ordered
//! list of `TaskDefinition`s.

pub mod defaults;
pub mod loader;
pub mod model;
pub mod validate;

pub use defaults::{CatalogueEntry, catalogue, catalogue_entry, default_task_definitions};
pub use loader::{
    CONFIG_FILE_NAMES, find_config_file, load_from_path, resolve_config, resolve_config_path,
};
pub use model::{ConfigSource, RawConfigFile, ResolvedConfig, UserTaskConfig};
pub use validate::{merge_with_catalogue, validate_raw_config};
