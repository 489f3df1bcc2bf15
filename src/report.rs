//! Assembles a renderable report from fetched issues.

use serde::Serialize;

use crate::aggregate::{aggregate, IssueTimeline};
use crate::error::ReconstructionWarning;
use crate::model::{DailyTotal, Issue};
use crate::reconstruct::reconstruct;
use crate::window::ReportWindow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionReport {
    pub project: String,
    /// Version or sprint name.
    pub scope: String,
    pub title: String,
    /// Axis label for the estimate unit, e.g. "Story Points".
    pub estimate_label: String,
    pub window: ReportWindow,
    pub issue_count: usize,
    pub totals: Vec<DailyTotal>,
    pub warnings: Vec<ReconstructionWarning>,
}

pub struct ReportInput<'a> {
    pub project: &'a str,
    /// "Version" or "Sprint".
    pub noun: &'a str,
    pub scope: String,
    pub estimate_label: &'a str,
    pub window: ReportWindow,
    pub issues: &'a [Issue],
    /// Warnings raised before reconstruction, e.g. while mapping issues.
    pub warnings: Vec<ReconstructionWarning>,
}

pub fn build_report(input: ReportInput<'_>) -> VersionReport {
    let timelines: Vec<IssueTimeline> = input
        .issues
        .iter()
        .map(|issue| IssueTimeline {
            key: issue.key.clone(),
            snapshots: reconstruct(issue, &input.window),
        })
        .collect();
    let aggregation = aggregate(&input.window, &timelines);

    let mut warnings = input.warnings;
    warnings.extend(aggregation.warnings);

    VersionReport {
        project: input.project.to_string(),
        title: format!("{} Report for {}", input.noun, input.scope),
        scope: input.scope,
        estimate_label: input.estimate_label.to_string(),
        window: input.window,
        issue_count: input.issues.len(),
        totals: aggregation.totals,
        warnings,
    }
}

impl VersionReport {
    pub fn last_total(&self) -> Option<&DailyTotal> {
        self.totals.last()
    }
}
