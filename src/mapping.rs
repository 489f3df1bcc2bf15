//! Conversion of Jira wire issues into typed domain issues.
//!
//! Anything structurally wrong (bad timestamps, an estimate field holding an
//! object) fails the fetch with the offending issue named. Values that are
//! merely unusable, such as a changelog estimate of `"abc"`, are dropped with
//! a warning.

use clap::ValueEnum;
use jira_api::{parse_timestamp, ChangelogItem, IssueFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FetchError, ReconstructionWarning, WarningKind};
use crate::model::{ChangelogEntry, FieldChange, Issue};
use crate::status::StatusClassifier;

pub const DEFAULT_ESTIMATE_FIELD_ID: &str = "customfield_10016";
pub const DEFAULT_ESTIMATE_FIELD_NAME: &str = "Story point estimate";
const STATUS_FIELD: &str = "status";
const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EstimateUnit {
    /// Story points, read from the display value.
    #[default]
    Points,
    /// Jira time tracking in seconds, reported as hours.
    Seconds,
}

impl EstimateUnit {
    pub fn label(self) -> &'static str {
        match self {
            EstimateUnit::Points => "Story Points",
            EstimateUnit::Seconds => "Hours",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimateField {
    pub id: String,
    pub name: String,
    pub unit: EstimateUnit,
}

impl Default for EstimateField {
    fn default() -> Self {
        Self {
            id: DEFAULT_ESTIMATE_FIELD_ID.to_string(),
            name: DEFAULT_ESTIMATE_FIELD_NAME.to_string(),
            unit: EstimateUnit::Points,
        }
    }
}

/// Why an estimate could not be read.
enum EstimateProblem {
    Unusable(String),
    Shape(String),
}

impl EstimateField {
    fn current(&self, fields: &IssueFields) -> Result<Option<f64>, EstimateProblem> {
        match fields.field(&self.id) {
            None => Ok(None),
            Some(Value::Number(number)) => match number.as_f64() {
                Some(value) => self.scaled(value, &number.to_string()),
                None => Err(EstimateProblem::Unusable(number.to_string())),
            },
            Some(Value::String(text)) => self.parse(text),
            Some(other) => Err(EstimateProblem::Shape(format!(
                "estimate field {} holds {other}",
                self.id
            ))),
        }
    }

    fn changelog_value(
        &self,
        raw: Option<&str>,
        display: Option<&str>,
    ) -> Result<Option<f64>, EstimateProblem> {
        let value = match self.unit {
            EstimateUnit::Points => display.or(raw),
            EstimateUnit::Seconds => raw,
        };
        match value {
            Some(text) => self.parse(text),
            None => Ok(None),
        }
    }

    fn parse(&self, text: &str) -> Result<Option<f64>, EstimateProblem> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(value) => self.scaled(value, trimmed),
            Err(_) => Err(EstimateProblem::Unusable(trimmed.to_string())),
        }
    }

    fn scaled(&self, value: f64, original: &str) -> Result<Option<f64>, EstimateProblem> {
        if !value.is_finite() || value < 0.0 {
            return Err(EstimateProblem::Unusable(original.to_string()));
        }
        Ok(Some(match self.unit {
            EstimateUnit::Points => value,
            EstimateUnit::Seconds => value / SECONDS_PER_HOUR,
        }))
    }

    fn matches(&self, item: &ChangelogItem) -> bool {
        item.is_field(&self.id, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappedIssue {
    pub issue: Issue,
    pub warnings: Vec<ReconstructionWarning>,
}

pub struct IssueMapper<'a> {
    estimate: &'a EstimateField,
    statuses: &'a StatusClassifier,
}

impl<'a> IssueMapper<'a> {
    pub fn new(estimate: &'a EstimateField, statuses: &'a StatusClassifier) -> Self {
        Self { estimate, statuses }
    }

    pub fn map(&self, wire: &jira_api::Issue) -> Result<MappedIssue, FetchError> {
        let key = wire.key.as_str();
        let fields = &wire.fields;
        let mut warnings = Vec::new();

        let created = match fields.created.as_deref() {
            Some(raw) => Some(parse_timestamp(raw).map_err(|err| {
                FetchError::shape(key, format!("invalid created timestamp '{raw}': {err}"))
            })?),
            None => {
                warnings.push(ReconstructionWarning::new(key, WarningKind::MissingCreated));
                None
            }
        };

        let status = fields
            .status
            .as_ref()
            .map(|status| self.statuses.classify_ref(status))
            .unwrap_or_default();

        let estimate = match self.estimate.current(fields) {
            Ok(value) => value,
            Err(EstimateProblem::Unusable(value)) => {
                warnings.push(ReconstructionWarning::new(
                    key,
                    WarningKind::UnparseableEstimate { value },
                ));
                None
            }
            Err(EstimateProblem::Shape(message)) => return Err(FetchError::shape(key, message)),
        };

        let mut changelog = Vec::new();
        for history in wire.histories() {
            let timestamp = parse_timestamp(&history.created).map_err(|err| {
                FetchError::shape(
                    key,
                    format!("invalid changelog timestamp '{}': {err}", history.created),
                )
            })?;
            for item in &history.items {
                let change = if self.estimate.matches(item) {
                    match self.estimate_change(item) {
                        Ok(change) => change,
                        Err(value) => {
                            warnings.push(ReconstructionWarning::new(
                                key,
                                WarningKind::UnparseableEstimate { value },
                            ));
                            continue;
                        }
                    }
                } else if is_status(item) {
                    FieldChange::Status {
                        from: self
                            .statuses
                            .classify(item.from.as_deref(), item.from_string.as_deref()),
                        to: self
                            .statuses
                            .classify(item.to.as_deref(), item.to_string.as_deref()),
                    }
                } else {
                    continue;
                };
                changelog.push(ChangelogEntry { timestamp, change });
            }
        }
        changelog.sort_by_key(|entry| entry.timestamp);

        if let Some(log) = &wire.changelog {
            let received = log.histories.len();
            if (received as u64) < log.total {
                warnings.push(ReconstructionWarning::new(
                    key,
                    WarningKind::IncompleteChangelog {
                        expected: log.total,
                        received,
                    },
                ));
            }
        }

        Ok(MappedIssue {
            issue: Issue {
                key: wire.key.clone(),
                issue_type: fields
                    .issuetype
                    .as_ref()
                    .and_then(|issue_type| issue_type.name.clone()),
                created,
                estimate,
                status,
                changelog,
            },
            warnings,
        })
    }

    fn estimate_change(&self, item: &ChangelogItem) -> Result<FieldChange, String> {
        let read = |raw: Option<&str>, display: Option<&str>| {
            self.estimate
                .changelog_value(raw, display)
                .map_err(|problem| match problem {
                    EstimateProblem::Unusable(value) | EstimateProblem::Shape(value) => value,
                })
        };
        Ok(FieldChange::Estimate {
            from: read(item.from.as_deref(), item.from_string.as_deref())?,
            to: read(item.to.as_deref(), item.to_string.as_deref())?,
        })
    }
}

fn is_status(item: &ChangelogItem) -> bool {
    item.is_field(STATUS_FIELD, STATUS_FIELD)
}
