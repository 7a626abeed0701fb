// src/render/table.rs

//! Terminal summary table drawn with `comfy-table`.

use std::io::Write;

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use console::{Term, style};
use tracing::warn;

use super::{Renderer, TaskView, all_settled, format_duration, overall_duration};
use crate::engine::failures_in_completion_order;
use crate::parsers::counted;
use crate::types::{FailureDetails, RunOptions, TaskState};

const HEADERS: [&str; 4] = ["Label", "Tool", "Results", "Time"];
pub const SILENT_HINT: &str = "Some checks failed. Run without --silent to see details.";
const VARIANT_LEGEND: &str =
    "(* indicates a loose or fix variant of the command is running)";

fn icon(state: TaskState) -> &'static str {
    match state {
        TaskState::Pending => "  ",
        TaskState::Running => "⏳",
        TaskState::Success => "✅",
        TaskState::Failure => "❌",
    }
}

/// Live summary renderer used by the binary.
///
/// Clears and redraws the whole screen when stdout is a terminal; otherwise
/// frames are appended one after another.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    term: Term,
    use_colors: bool,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            use_colors: console::colors_enabled(),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Build one complete frame as a string.
    pub fn frame(&self, tasks: &[TaskView<'_>], options: &RunOptions) -> String {
        let mut out = String::from("Running project checks:\n\n");

        if options.is_loose_mode || options.is_fix_mode {
            out.push_str(VARIANT_LEGEND);
            out.push_str("\n\n");
        }

        out.push_str(&self.table(tasks).to_string());
        out.push('\n');

        if all_settled(tasks) {
            let failures = failures_in_completion_order(tasks.iter().map(|t| t.snapshot));
            if !failures.is_empty() {
                out.push('\n');
                if options.is_silent_mode {
                    out.push_str(SILENT_HINT);
                    out.push('\n');
                } else {
                    out.push_str(&self.details(&failures));
                }
            }

            if options.is_watch_mode {
                out.push_str("\nWatching for changes... (press Ctrl+C to exit)\n");
            }
        }

        out
    }

    fn table(&self, tasks: &[TaskView<'_>]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Disabled);
        if self.use_colors {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }

        table.set_header(
            HEADERS
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );

        for task in tasks {
            let state = task.state();
            let message = if state == TaskState::Pending {
                ""
            } else {
                task.snapshot.message.as_str()
            };
            let mut result = Cell::new(message);
            if state == TaskState::Failure {
                result = result.fg(Color::Red);
            }

            table.add_row(vec![
                Cell::new(format!("{} {}", icon(state), task.label)),
                Cell::new(task.tool),
                result,
                Cell::new(format_duration(task.snapshot.duration())),
            ]);
        }

        table.add_row(
            self.overall_row(tasks)
                .into_iter()
                .map(|text| Cell::new(text).add_attribute(Attribute::Bold)),
        );

        table
    }

    fn overall_row(&self, tasks: &[TaskView<'_>]) -> [String; 4] {
        let errors = tasks
            .iter()
            .map(|t| t.snapshot.errors)
            .fold(0, u32::saturating_add);
        let warnings = tasks
            .iter()
            .map(|t| t.snapshot.warnings)
            .fold(0, u32::saturating_add);
        let issues = errors.saturating_add(warnings);

        let overall_icon = if !all_settled(tasks) {
            icon(TaskState::Running)
        } else if issues == 0 {
            icon(TaskState::Success)
        } else {
            icon(TaskState::Failure)
        };

        let mut breakdown = Vec::new();
        if errors > 0 {
            breakdown.push(counted(errors, "error", "errors"));
        }
        if warnings > 0 {
            breakdown.push(counted(warnings, "warning", "warnings"));
        }
        let breakdown = if breakdown.is_empty() {
            String::new()
        } else {
            format!(" ({})", breakdown.join(", "))
        };

        [
            format!("{overall_icon} Overall"),
            String::new(),
            format!("{}{breakdown}", counted(issues, "issue", "issues")),
            format_duration(overall_duration(tasks)),
        ]
    }

    fn details(&self, failures: &[&FailureDetails]) -> String {
        let mut out = String::from("Details:\n");
        for failure in failures {
            out.push('\n');
            out.push_str(&self.headline(failure));
            out.push('\n');

            let body = [failure.raw_output.trim_end(), failure.output.as_str()]
                .into_iter()
                .find(|s| !s.trim().is_empty())
                .unwrap_or("(no output)");
            out.push_str(body);
            out.push('\n');
        }
        out
    }

    /// `Linting - ESLint [npx eslint .] (3 errors, 2 warnings)`
    pub fn headline(&self, failure: &FailureDetails) -> String {
        let mut breakdown = Vec::new();
        if let Some(errors) = failure.errors {
            breakdown.push(counted(errors, "error", "errors"));
        }
        if let Some(warnings) = failure.warnings {
            breakdown.push(counted(warnings, "warning", "warnings"));
        }
        let detail = if breakdown.is_empty() {
            failure
                .summary
                .clone()
                .unwrap_or_else(|| "See output".to_string())
        } else {
            breakdown.join(", ")
        };

        if !self.use_colors {
            return format!(
                "{} - {} [{}] ({})",
                failure.label, failure.tool, failure.command, detail
            );
        }

        format!(
            "{} - {} [{}] ({})",
            style(&failure.label).blue().underlined().force_styling(true),
            failure.tool,
            style(&failure.command).yellow().force_styling(true),
            style(detail).red().force_styling(true),
        )
    }
}

impl Renderer for TableRenderer {
    fn render(&self, tasks: &[TaskView<'_>], options: &RunOptions) {
        let frame = self.frame(tasks, options);

        if self.term.is_term() {
            if let Err(err) = self.term.clear_screen() {
                warn!(error = %err, "failed to clear terminal");
            }
        }

        let mut term = self.term.clone();
        if let Err(err) = term.write_all(frame.as_bytes()).and_then(|()| term.flush()) {
            warn!(error = %err, "failed to write summary table");
        }
    }
}
