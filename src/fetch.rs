//! Issue fetching: everything assigned to a version or sprint, with full changelogs.

use std::fmt;
use std::future::Future;

use chrono::NaiveDate;
use jira_api::{JiraClient, SearchRequest};
use log::{debug, info};

use crate::error::{FetchError, ReconstructionWarning};
use crate::jql;
use crate::mapping::{EstimateField, IssueMapper};
use crate::model::Issue;
use crate::status::StatusClassifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeTarget {
    /// Version name or id.
    Version(String),
    Sprint(u64),
}

impl ScopeTarget {
    pub fn noun(&self) -> &'static str {
        match self {
            ScopeTarget::Version(_) => "Version",
            ScopeTarget::Sprint(_) => "Sprint",
        }
    }
}

impl fmt::Display for ScopeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeTarget::Version(version) => write!(f, "version {}", version),
            ScopeTarget::Sprint(id) => write!(f, "sprint {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub project: String,
    pub target: ScopeTarget,
    /// Empty means every issue type.
    pub issue_types: Vec<String>,
}

/// Issues of one version or sprint plus the dates Jira knows for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedScope {
    pub name: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub issues: Vec<Issue>,
    pub warnings: Vec<ReconstructionWarning>,
}

pub trait IssueSource {
    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<FetchedScope, FetchError>> + Send;
}

pub struct JiraIssueSource {
    client: JiraClient,
    estimate: EstimateField,
    done_statuses: Vec<String>,
}

struct ResolvedScope {
    name: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    clause: String,
}

impl JiraIssueSource {
    pub fn new(client: JiraClient, estimate: EstimateField, done_statuses: Vec<String>) -> Self {
        Self {
            client,
            estimate,
            done_statuses,
        }
    }

    async fn resolve_scope(&self, request: &FetchRequest) -> Result<ResolvedScope, FetchError> {
        match &request.target {
            ScopeTarget::Version(identifier) => {
                let versions = self.client.project_versions(&request.project).await?;
                let version = versions
                    .into_iter()
                    .find(|version| version.matches(identifier))
                    .ok_or_else(|| FetchError::VersionNotFound {
                        project: request.project.clone(),
                        version: identifier.clone(),
                    })?;
                Ok(ResolvedScope {
                    clause: jql::fix_version_clause(&version.name),
                    start: version.start(),
                    end: version.release(),
                    name: version.name,
                })
            }
            ScopeTarget::Sprint(id) => {
                let sprint = self.client.sprint(*id).await?;
                Ok(ResolvedScope {
                    clause: jql::sprint_clause(sprint.id),
                    start: sprint.start().map(|start| start.date_naive()),
                    end: sprint.end().map(|end| end.date_naive()),
                    name: sprint.name,
                })
            }
        }
    }
}

impl IssueSource for JiraIssueSource {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedScope, FetchError> {
        let statuses = self.client.project_statuses(&request.project).await?;
        let classifier = StatusClassifier::from_project(&statuses, &self.done_statuses);
        let scope = self.resolve_scope(request).await?;

        let query = jql::scope_query(&request.project, &scope.clause, &request.issue_types);
        debug!("searching issues: {}", query);
        let fields = ["created", "status", "issuetype", self.estimate.id.as_str()];
        let search =
            SearchRequest::new(query, &fields, self.client.config().page_size).with_changelog();
        let mut wire_issues = self.client.search_all(search).await?;
        let topped_up = self.client.complete_changelogs(&mut wire_issues).await?;
        if topped_up > 0 {
            debug!("fetched complete changelogs for {} issues", topped_up);
        }

        let mapper = IssueMapper::new(&self.estimate, &classifier);
        let mut issues = Vec::with_capacity(wire_issues.len());
        let mut warnings = Vec::new();
        for wire in &wire_issues {
            let mapped = mapper.map(wire)?;
            issues.push(mapped.issue);
            warnings.extend(mapped.warnings);
        }

        info!(
            "fetched {} issues for {} {} in project {}",
            issues.len(),
            request.target.noun().to_lowercase(),
            scope.name,
            request.project
        );
        Ok(FetchedScope {
            name: scope.name,
            start: scope.start,
            end: scope.end,
            issues,
            warnings,
        })
    }
}
