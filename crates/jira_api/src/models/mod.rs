mod changelog;
mod issue;
mod lenient;
mod search;
mod status;
mod user;
mod version;

use chrono::{DateTime, FixedOffset, ParseError};

pub use changelog::{Changelog, ChangelogItem, ChangelogPage, History};
pub use issue::{Issue, IssueFields, IssueTypeRef};
pub use search::{SearchPage, SearchRequest};
pub use status::{IssueTypeStatuses, StatusCategoryRef, StatusRef};
pub use user::UserProfile;
pub use version::{Sprint, Version};

/// Parses Jira timestamps: `2024-01-05T10:00:00.000+0000` as well as RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
}
