// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::defaults::default_task_definitions;
use crate::config::model::{ConfigSource, RawConfigFile, ResolvedConfig};
use crate::config::validate::{merge_with_catalogue, validate_raw_config};
use crate::errors::{ReadyError, Result};
use crate::parsers::ParserRegistry;
use crate::types::RunOptions;

/// File names looked up in the project root, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".is-it-ready.toml", "is-it-ready.toml"];

/// Read and deserialize a config file.
///
/// Only TOML parsing happens here; see [`validate_raw_config`] for the
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// First config file that exists in `root`, if any.
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
}

/// Decide which file (if any) configures this run.
///
/// An explicit `--config` path must exist. Without one, the project root is
/// searched for the standard file names.
pub fn resolve_config_path(options: &RunOptions, root: &Path) -> Result<Option<PathBuf>> {
    match &options.config_path {
        Some(explicit) => {
            let path = if explicit.is_absolute() {
                explicit.clone()
            } else {
                root.join(explicit)
            };
            if !path.is_file() {
                return Err(ReadyError::ConfigError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Ok(Some(path))
        }
        None => Ok(find_config_file(root)),
    }
}

/// Produce the ordered task list for this run.
///
/// Falls back to the bundled catalogue when no config file is found.
pub fn resolve_config(
    options: &RunOptions,
    root: &Path,
    registry: &ParserRegistry,
) -> Result<ResolvedConfig> {
    let Some(path) = resolve_config_path(options, root)? else {
        debug!(root = %root.display(), "no config file found, using default checks");
        return Ok(ResolvedConfig {
            tasks: default_task_definitions(registry),
            watch_ignore: None,
            source: ConfigSource::Defaults,
        });
    };

    let raw = load_from_path(&path)?;
    validate_raw_config(&raw)?;
    let tasks = merge_with_catalogue(&raw, registry)?;

    info!(path = %path.display(), tasks = tasks.len(), "loaded config");

    Ok(ResolvedConfig {
        tasks,
        watch_ignore: raw.watch_ignore,
        source: ConfigSource::File(path),
    })
}
