use serde::Deserialize;

use super::lenient::deserialize_string_field;

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusRef {
    #[serde(default, deserialize_with = "deserialize_string_field")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub status_category: Option<StatusCategoryRef>,
}

/// Jira's fixed buckets: `new`, `indeterminate`, `done` (plus `undefined`).
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategoryRef {
    pub key: Option<String>,
    pub name: Option<String>,
}

impl StatusRef {
    pub fn category_key(&self) -> Option<&str> {
        self.status_category
            .as_ref()
            .and_then(|category| category.key.as_deref())
    }
}

/// Entry of `project/{key}/statuses`: the workflow statuses of one issue type.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IssueTypeStatuses {
    #[serde(default, deserialize_with = "deserialize_string_field")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub statuses: Vec<StatusRef>,
}
