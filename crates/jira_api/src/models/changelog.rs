//! Changelog payloads, embedded in search results or paged from `issue/{key}/changelog`.

use serde::Deserialize;

use super::lenient::deserialize_string_field;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Changelog {
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub histories: Vec<History>,
}

/// One edit of an issue; a single edit may touch several fields.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct History {
    #[serde(default, deserialize_with = "deserialize_string_field")]
    pub id: Option<String>,
    pub created: String,
    #[serde(default)]
    pub items: Vec<ChangelogItem>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogItem {
    pub field: String,
    #[serde(default)]
    pub fieldtype: Option<String>,
    #[serde(default)]
    pub field_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_field")]
    pub from: Option<String>,
    #[serde(default)]
    pub from_string: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_field")]
    pub to: Option<String>,
    #[serde(default)]
    pub to_string: Option<String>,
}

impl ChangelogItem {
    /// Matches by field id first, then by display name (older payloads omit `fieldId`).
    pub fn is_field(&self, field_id: &str, field_name: &str) -> bool {
        match &self.field_id {
            Some(id) if id == field_id => true,
            _ => self.field.eq_ignore_ascii_case(field_name),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogPage {
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub is_last: Option<bool>,
    #[serde(default)]
    pub values: Vec<History>,
}

impl ChangelogPage {
    pub fn is_last(&self) -> bool {
        if self.values.is_empty() {
            return true;
        }
        self.is_last
            .unwrap_or(self.start_at + self.values.len() as u64 >= self.total)
    }
}
