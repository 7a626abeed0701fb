use std::sync::{Arc, Mutex};

use is_it_ready::render::{Renderer, TaskView};
use is_it_ready::types::{RunOptions, TaskState};

/// One row of a recorded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub label: String,
    pub state: TaskState,
    pub message: String,
    pub errors: u32,
    pub warnings: u32,
}

/// Renderer that keeps every frame it is asked to draw.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<Vec<FrameRow>>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Vec<FrameRow>> {
        self.frames.lock().unwrap().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn last_frame(&self) -> Option<Vec<FrameRow>> {
        self.frames.lock().unwrap().last().cloned()
    }

    /// States of every task, frame by frame.
    pub fn states(&self) -> Vec<Vec<TaskState>> {
        self.frames()
            .into_iter()
            .map(|frame| frame.into_iter().map(|row| row.state).collect())
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, tasks: &[TaskView<'_>], _options: &RunOptions) {
        let frame = tasks
            .iter()
            .map(|view| FrameRow {
                label: view.label.to_string(),
                state: view.snapshot.state,
                message: view.snapshot.message.clone(),
                errors: view.snapshot.errors,
                warnings: view.snapshot.warnings,
            })
            .collect();
        self.frames.lock().unwrap().push(frame);
    }
}
