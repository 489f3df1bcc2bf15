//! Maps project-specific workflow statuses onto `StatusCategory`.

use std::collections::{HashMap, HashSet};

use jira_api::{IssueTypeStatuses, StatusRef};

use crate::model::StatusCategory;

/// Lookup built from the project's workflow; names listed as done always count as `Done`.
#[derive(Debug, Clone, Default)]
pub struct StatusClassifier {
    by_id: HashMap<String, StatusCategory>,
    by_name: HashMap<String, StatusCategory>,
    done_names: HashSet<String>,
}

impl StatusClassifier {
    pub fn new(done_names: &[String]) -> Self {
        Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
            done_names: done_names.iter().map(|name| normalize(name)).collect(),
        }
    }

    pub fn from_project(statuses: &[IssueTypeStatuses], done_names: &[String]) -> Self {
        let mut classifier = Self::new(done_names);
        for status in statuses.iter().flat_map(|issue_type| &issue_type.statuses) {
            classifier.learn(status);
        }
        classifier
    }

    pub fn learn(&mut self, status: &StatusRef) {
        let Some(key) = status.category_key() else {
            return;
        };
        let category = StatusCategory::from_category_key(key);
        if let Some(id) = &status.id {
            self.by_id.insert(id.clone(), category);
        }
        if let Some(name) = &status.name {
            self.by_name.insert(normalize(name), category);
        }
    }

    /// Changelog items only carry the status id and display name.
    pub fn classify(&self, id: Option<&str>, name: Option<&str>) -> StatusCategory {
        let name = name.map(normalize);
        if let Some(name) = &name {
            if self.done_names.contains(name) {
                return StatusCategory::Done;
            }
        }
        id.and_then(|id| self.by_id.get(id))
            .or_else(|| name.as_ref().and_then(|name| self.by_name.get(name)))
            .copied()
            .unwrap_or_default()
    }

    /// Current issue status, which embeds its own category.
    pub fn classify_ref(&self, status: &StatusRef) -> StatusCategory {
        if let Some(name) = &status.name {
            if self.done_names.contains(&normalize(name)) {
                return StatusCategory::Done;
            }
        }
        match status.category_key() {
            Some(key) => StatusCategory::from_category_key(key),
            None => self.classify(status.id.as_deref(), status.name.as_deref()),
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
