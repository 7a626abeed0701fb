#![allow(dead_code)]

use is_it_ready::parsers::ParserRegistry;
use is_it_ready::task::TaskDefinition;
use is_it_ready::types::{CommandResult, ParsedFailure, RunOptions};

/// Builder for `TaskDefinition` to simplify test setup.
pub struct TaskDefinitionBuilder {
    definition: TaskDefinition,
}

impl TaskDefinitionBuilder {
    /// Task whose tool has no registered parser unless one is bound.
    pub fn new(label: &str, command: &str) -> Self {
        Self {
            definition: TaskDefinition::new(label, "Custom", command),
        }
    }

    pub fn tool(mut self, tool: &str) -> Self {
        self.definition.tool = tool.to_string();
        self
    }

    pub fn loose(mut self, command: &str) -> Self {
        self.definition.loose_command = Some(command.to_string());
        self
    }

    pub fn fix(mut self, command: &str) -> Self {
        self.definition.fix_command = Some(command.to_string());
        self
    }

    /// Bind the bundled parser for the current tool.
    pub fn with_default_parser(self) -> Self {
        let registry = ParserRegistry::with_defaults();
        Self {
            definition: self.definition.bind_parser(&registry),
        }
    }

    pub fn parser<F>(self, parser: F) -> Self
    where
        F: Fn(&str) -> Option<ParsedFailure> + Send + Sync + 'static,
    {
        Self {
            definition: self.definition.with_parser(parser),
        }
    }

    pub fn build(self) -> TaskDefinition {
        self.definition
    }
}

/// Builder for `RunOptions`.
#[derive(Default)]
pub struct RunOptionsBuilder {
    options: RunOptions,
}

impl RunOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fix(mut self) -> Self {
        self.options.is_fix_mode = true;
        self
    }

    pub fn loose(mut self) -> Self {
        self.options.is_loose_mode = true;
        self
    }

    pub fn silent(mut self) -> Self {
        self.options.is_silent_mode = true;
        self
    }

    pub fn watch(mut self) -> Self {
        self.options.is_watch_mode = true;
        self
    }

    pub fn build(self) -> RunOptions {
        self.options
    }
}

/// Process that exited 0 with the given stdout.
pub fn exit_ok(stdout: &str) -> CommandResult {
    CommandResult {
        status: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Process that exited with `code` and the given stdout.
pub fn exit_with(code: i32, stdout: &str) -> CommandResult {
    CommandResult {
        status: Some(code),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}
