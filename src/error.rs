//! Error and warning types for the report pipeline.
//!
//! Fatal conditions are `ReportError`s and abort the run. Data problems that
//! only affect part of the report are `ReconstructionWarning`s: they are
//! collected along the way and summarised once the report is produced.

use std::fmt;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use jira_api::JiraError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to fetch {target} of project {project}: {source}")]
    Fetch {
        project: String,
        target: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to render report for {target}: {source}")]
    Render {
        target: String,
        #[source]
        source: RenderError,
    },

    #[error(transparent)]
    Api(#[from] JiraError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing {what}\n  hint: {hint}")]
    Missing {
        what: &'static str,
        hint: &'static str,
    },

    #[error("invalid project key '{0}'\n  hint: project keys are letters, digits and underscores starting with a letter, e.g. APP")]
    InvalidProjectKey(String),

    #[error("no start date known for {scope}\n  hint: pass --start YYYY-MM-DD")]
    MissingStart { scope: String },

    #[error("invalid reporting window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("could not determine the configuration directory\n  hint: pass --config PATH")]
    NoConfigDir,

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Api(#[from] JiraError),

    #[error("version '{version}' does not exist in project {project}")]
    VersionNotFound { project: String, version: String },

    #[error("unexpected data for issue {issue}: {message}")]
    Shape { issue: String, message: String },
}

impl FetchError {
    pub fn shape(issue: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::Shape {
            issue: issue.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to format chart: {0}")]
    Format(#[from] fmt::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A data problem confined to one issue; the report is still produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconstructionWarning {
    pub issue: String,
    #[serde(flatten)]
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// Jira reported more histories than could be fetched.
    IncompleteChangelog { expected: u64, received: usize },
    /// A changelog entry carried an estimate that is not a non-negative number; the entry is ignored.
    UnparseableEstimate { value: String },
    /// No creation date; the issue is treated as existing for the whole window.
    MissingCreated,
    /// The issue did not exist on any day of the window.
    NoSnapshots,
    /// The snapshot sequence does not line up with the reporting window.
    MisalignedSnapshots { expected: usize, received: usize },
}

impl ReconstructionWarning {
    pub fn new(issue: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            issue: issue.into(),
            kind,
        }
    }
}

impl fmt::Display for ReconstructionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::IncompleteChangelog { expected, received } => write!(
                f,
                "{}: changelog incomplete ({received} of {expected} histories)",
                self.issue
            ),
            WarningKind::UnparseableEstimate { value } => {
                write!(f, "{}: ignored unparseable estimate '{value}'", self.issue)
            }
            WarningKind::MissingCreated => {
                write!(f, "{}: no creation date, assumed to exist throughout", self.issue)
            }
            WarningKind::NoSnapshots => {
                write!(f, "{}: no data inside the reporting window, excluded", self.issue)
            }
            WarningKind::MisalignedSnapshots { expected, received } => write!(
                f,
                "{}: {received} snapshots for a {expected}-day window, excluded",
                self.issue
            ),
        }
    }
}
