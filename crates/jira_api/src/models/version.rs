//! Project version (fix version) and agile sprint models.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;

use super::lenient::deserialize_string_field;
use super::parse_timestamp;

/// Represents a project version as returned by `project/{key}/versions`, including release state and planned dates.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    #[serde(default, deserialize_with = "deserialize_string_field")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub released: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Version {
    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_day)
    }

    pub fn release(&self) -> Option<NaiveDate> {
        self.release_date.as_deref().and_then(parse_day)
    }

    /// Matches either the numeric id or the exact version name.
    pub fn matches(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.id.as_deref() == Some(identifier) || self.name == identifier
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub complete_date: Option<String>,
}

impl Sprint {
    pub fn start(&self) -> Option<DateTime<FixedOffset>> {
        self.start_date.as_deref().and_then(|v| parse_timestamp(v).ok())
    }

    /// Completion date for closed sprints, otherwise the planned end.
    pub fn end(&self) -> Option<DateTime<FixedOffset>> {
        self.complete_date
            .as_deref()
            .or(self.end_date.as_deref())
            .and_then(|v| parse_timestamp(v).ok())
    }
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
