use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::changelog::{Changelog, History};
use super::lenient::deserialize_string_field;
use super::status::StatusRef;

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(default, deserialize_with = "deserialize_string_field")]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
    #[serde(default)]
    pub changelog: Option<Changelog>,
}

/// The requested issue fields. Custom fields (story points and friends) land in `extra`.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub status: Option<StatusRef>,
    #[serde(default)]
    pub issuetype: Option<IssueTypeRef>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl IssueFields {
    /// Non-null value of a dynamic field such as `customfield_10016`.
    pub fn field(&self, id: &str) -> Option<&Value> {
        self.extra.get(id).filter(|value| !value.is_null())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IssueTypeRef {
    #[serde(default, deserialize_with = "deserialize_string_field")]
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Issue {
    /// Histories embedded in the search response, empty when changelog was not expanded.
    pub fn histories(&self) -> &[History] {
        self.changelog
            .as_ref()
            .map(|log| log.histories.as_slice())
            .unwrap_or(&[])
    }

    /// True when the embedded changelog holds fewer histories than Jira reports.
    pub fn changelog_truncated(&self) -> bool {
        self.changelog
            .as_ref()
            .map(|log| (log.histories.len() as u64) < log.total)
            .unwrap_or(false)
    }
}
