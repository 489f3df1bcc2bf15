use serde::{Deserialize, Serialize};

use super::Issue;

/// Body of `POST search/jql`.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub jql: String,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl SearchRequest {
    pub fn new(jql: impl Into<String>, fields: &[&str], max_results: u32) -> Self {
        Self {
            jql: jql.into(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
            expand: None,
            max_results,
            next_page_token: None,
        }
    }

    pub fn with_changelog(mut self) -> Self {
        self.expand = Some("changelog".to_string());
        self
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub is_last: Option<bool>,
}

impl SearchPage {
    /// A page without a continuation token is the last one whatever `isLast` says.
    pub fn is_last(&self) -> bool {
        self.is_last == Some(true) || self.next_page_token.is_none()
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}
