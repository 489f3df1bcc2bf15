//! Typed Jira Cloud REST API client used by the version report tool.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_limiter;

pub use client::JiraClient;
pub use config::{AuthMethod, JiraConfig};
pub use error::{JiraError, Result};
pub use models::{
    parse_timestamp, Changelog, ChangelogItem, ChangelogPage, History, Issue, IssueFields,
    IssueTypeRef, IssueTypeStatuses, SearchPage, SearchRequest, Sprint, StatusCategoryRef,
    StatusRef, UserProfile, Version,
};
pub use rate_limiter::RateLimiter;
