// src/task/definition.rs

use std::fmt;

use crate::parsers::{ParserFn, ParserRegistry};
use crate::types::{ParsedFailure, RunOptions};

/// Immutable description of one check, built once from the merged
/// catalogue and user configuration.
#[derive(Clone)]
pub struct TaskDefinition {
    pub label: String,
    pub tool: String,
    pub command: String,
    /// Permissive variant used in loose mode.
    pub loose_command: Option<String>,
    /// Auto-correcting variant used in fix mode.
    pub fix_command: Option<String>,
    /// Output classifier; `None` means the exit status alone decides.
    pub parser: Option<ParserFn>,
}

impl fmt::Debug for TaskDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDefinition")
            .field("label", &self.label)
            .field("tool", &self.tool)
            .field("command", &self.command)
            .field("loose_command", &self.loose_command)
            .field("fix_command", &self.fix_command)
            .field("has_parser", &self.parser.is_some())
            .finish()
    }
}

impl TaskDefinition {
    pub fn new(
        label: impl Into<String>,
        tool: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            tool: tool.into(),
            command: command.into(),
            loose_command: None,
            fix_command: None,
            parser: None,
        }
    }

    pub fn with_loose_command(mut self, command: impl Into<String>) -> Self {
        self.loose_command = Some(command.into());
        self
    }

    pub fn with_fix_command(mut self, command: impl Into<String>) -> Self {
        self.fix_command = Some(command.into());
        self
    }

    pub fn with_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&str) -> Option<ParsedFailure> + Send + Sync + 'static,
    {
        self.parser = Some(std::sync::Arc::new(parser));
        self
    }

    /// Bind whatever parser `registry` holds for this definition's tool.
    pub fn bind_parser(mut self, registry: &ParserRegistry) -> Self {
        self.parser = registry.lookup(&self.tool);
        self
    }

    /// Classify combined, ANSI-stripped output.
    pub fn classify(&self, output: &str) -> Option<ParsedFailure> {
        self.parser.as_ref().and_then(|parse| parse(output))
    }
}

/// Which configured command a task resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandVariant {
    Base,
    Loose,
    Fix,
}

/// Label and command a task actually runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableCommand {
    pub label: String,
    pub command: String,
    pub variant: CommandVariant,
}

/// Pick the command for the current run modes.
///
/// Fix wins over loose, loose over base. A mode only applies when the
/// definition carries a non-blank command for it. The label gains a `*`
/// suffix whenever a variant other than the base command is selected.
pub fn select_command(definition: &TaskDefinition, options: &RunOptions) -> ExecutableCommand {
    let fix = non_blank(definition.fix_command.as_deref()).filter(|_| options.is_fix_mode);
    let loose = non_blank(definition.loose_command.as_deref()).filter(|_| options.is_loose_mode);

    let (command, variant) = match (fix, loose) {
        (Some(cmd), _) => (cmd, CommandVariant::Fix),
        (None, Some(cmd)) => (cmd, CommandVariant::Loose),
        (None, None) => (definition.command.as_str(), CommandVariant::Base),
    };

    let label = match variant {
        CommandVariant::Base => definition.label.clone(),
        CommandVariant::Loose | CommandVariant::Fix => format!("{}*", definition.label),
    };

    ExecutableCommand {
        label,
        command: command.to_string(),
        variant,
    }
}

fn non_blank(command: Option<&str>) -> Option<&str> {
    command.filter(|c| !c.trim().is_empty())
}
