// src/config/validate.rs

use globset::Glob;

use crate::config::defaults::catalogue_entry;
use crate::config::model::{RawConfigFile, UserTaskConfig};
use crate::errors::{ReadyError, Result};
use crate::parsers::ParserRegistry;
use crate::task::TaskDefinition;

/// Semantic checks on a freshly parsed config file.
pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    for (index, task) in cfg.tasks.iter().enumerate() {
        validate_task(index, task)?;
    }
    validate_watch_ignore(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.tasks.is_empty() {
        return Err(ReadyError::ConfigError(
            "config must contain at least one [[task]] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_task(index: usize, task: &UserTaskConfig) -> Result<()> {
    if catalogue_entry(&task.tool).is_none() {
        return Err(ReadyError::UnknownTool(task.tool.clone()));
    }

    if task.command.trim().is_empty() {
        return Err(ReadyError::ConfigError(format!(
            "task #{} ('{}') has an empty `command`",
            index + 1,
            task.tool
        )));
    }

    if task.label.as_deref().is_some_and(|l| l.trim().is_empty()) {
        return Err(ReadyError::ConfigError(format!(
            "task #{} ('{}') has an empty `label`",
            index + 1,
            task.tool
        )));
    }

    Ok(())
}

fn validate_watch_ignore(cfg: &RawConfigFile) -> Result<()> {
    for pattern in cfg.watch_ignore.iter().flatten() {
        Glob::new(pattern).map_err(|err| {
            ReadyError::ConfigError(format!("invalid watch_ignore pattern '{pattern}': {err}"))
        })?;
    }
    Ok(())
}

/// Turn validated user tasks into definitions, filling in the label and
/// parser from the catalogue.
///
/// Blank `loose_command`/`fix_command` values are dropped so the base
/// command is used in that mode.
pub fn merge_with_catalogue(
    cfg: &RawConfigFile,
    registry: &ParserRegistry,
) -> Result<Vec<TaskDefinition>> {
    cfg.tasks
        .iter()
        .map(|task| {
            let entry = catalogue_entry(&task.tool)
                .ok_or_else(|| ReadyError::UnknownTool(task.tool.clone()))?;

            let label = task
                .label
                .clone()
                .unwrap_or_else(|| entry.label.to_string());

            let mut definition = TaskDefinition::new(label, entry.tool, task.command.trim());
            definition.loose_command = non_blank(task.loose_command.as_deref());
            definition.fix_command = non_blank(task.fix_command.as_deref());
            Ok(definition.bind_parser(registry))
        })
        .collect()
}

fn non_blank(command: Option<&str>) -> Option<String> {
    command
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
