// src/engine/summary.rs

use crate::task::TaskSnapshot;
use crate::types::FailureDetails;

/// Aggregate outcome of one orchestrator run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_errors: u32,
    pub total_warnings: u32,
    /// One record per failed task, in the order the tasks finished.
    pub failures: Vec<FailureDetails>,
}

impl RunSummary {
    /// Sum the counters of settled snapshots.
    pub fn from_snapshots<'a>(snapshots: impl IntoIterator<Item = &'a TaskSnapshot>) -> Self {
        let snapshots: Vec<&TaskSnapshot> = snapshots.into_iter().collect();

        let (total_errors, total_warnings) =
            snapshots.iter().fold((0u32, 0u32), |(errors, warnings), snap| {
                (
                    errors.saturating_add(snap.errors),
                    warnings.saturating_add(snap.warnings),
                )
            });

        let failures = failures_in_completion_order(snapshots.iter().copied())
            .into_iter()
            .cloned()
            .collect();

        Self {
            total_errors,
            total_warnings,
            failures,
        }
    }

    pub fn total_issues(&self) -> u32 {
        self.total_errors.saturating_add(self.total_warnings)
    }

    pub fn is_clean(&self) -> bool {
        self.total_issues() == 0
    }

    /// Process exit code: 1 when any error or warning remains, else 0.
    pub fn exit_code(&self) -> i32 {
        exit_code_for(self.total_issues())
    }
}

pub fn exit_code_for(total_issues: u32) -> i32 {
    if total_issues > 0 { 1 } else { 0 }
}

/// Failure records ordered by when their task finished. Ties keep the
/// order they were given in.
pub fn failures_in_completion_order<'a>(
    snapshots: impl IntoIterator<Item = &'a TaskSnapshot>,
) -> Vec<&'a FailureDetails> {
    let mut finished: Vec<&TaskSnapshot> = snapshots
        .into_iter()
        .filter(|snap| snap.failure.is_some())
        .collect();
    finished.sort_by_key(|snap| snap.finished_at);

    finished
        .into_iter()
        .filter_map(|snap| snap.failure.as_ref())
        .collect()
}
