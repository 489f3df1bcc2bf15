//! Domain types shared by reconstruction, aggregation and rendering.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

/// Jira's status buckets; only `Done` counts as completed work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum StatusCategory {
    #[default]
    ToDo,
    InProgress,
    Done,
}

impl StatusCategory {
    /// Maps Jira status category keys (`new`, `indeterminate`, `done`).
    pub fn from_category_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "done" => StatusCategory::Done,
            "indeterminate" => StatusCategory::InProgress,
            _ => StatusCategory::ToDo,
        }
    }

    pub fn is_done(self) -> bool {
        self == StatusCategory::Done
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub key: String,
    pub issue_type: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    /// Current value as of the fetch.
    pub estimate: Option<f64>,
    /// Current value as of the fetch.
    pub status: StatusCategory,
    /// Sorted by timestamp.
    pub changelog: Vec<ChangelogEntry>,
}

impl Issue {
    pub fn created_day(&self) -> Option<NaiveDate> {
        self.created.map(|created| created.date_naive())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogEntry {
    pub timestamp: DateTime<FixedOffset>,
    pub change: FieldChange,
}

impl ChangelogEntry {
    /// Calendar day in the offset Jira reported the change with.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldChange {
    Estimate {
        from: Option<f64>,
        to: Option<f64>,
    },
    Status {
        from: StatusCategory,
        to: StatusCategory,
    },
}

/// End-of-day state of one issue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IssueState {
    pub estimate: Option<f64>,
    pub completed: bool,
}

/// `state` is `None` on days before the issue was created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySnapshot {
    pub day: NaiveDate,
    pub state: Option<IssueState>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub day: NaiveDate,
    pub scope: f64,
    pub completed: f64,
    pub unestimated: usize,
    pub existing: usize,
    pub unestimated_percent: f64,
}
