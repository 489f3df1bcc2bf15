//! JQL construction with validated keys and quoted values.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConfigError;

static PROJECT_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("invalid project key regex"));

/// Upper-cases and checks a project key so it can be embedded in JQL unquoted.
pub fn validate_project_key(key: &str) -> Result<String, ConfigError> {
    let normalized = key.trim().to_uppercase();
    if PROJECT_KEY_REGEX.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(ConfigError::InvalidProjectKey(key.to_string()))
    }
}

pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// `project = KEY AND <clause> [AND issuetype in (...)] ORDER BY created ASC`
pub fn scope_query(project: &str, clause: &str, issue_types: &[String]) -> String {
    let mut jql = format!("project = {} AND {}", project, clause);
    if !issue_types.is_empty() {
        let types = issue_types
            .iter()
            .map(|name| quote(name))
            .collect::<Vec<_>>()
            .join(", ");
        jql.push_str(&format!(" AND issuetype in ({})", types));
    }
    jql.push_str(" ORDER BY created ASC");
    jql
}

pub fn fix_version_clause(name: &str) -> String {
    format!("fixVersion = {}", quote(name))
}

pub fn sprint_clause(sprint_id: u64) -> String {
    format!("sprint = {}", sprint_id)
}

#[cfg(test)]
mod tests {
    use super::{fix_version_clause, quote, scope_query, sprint_clause, validate_project_key};

    #[test]
    fn project_keys_are_normalized_and_checked() {
        assert_eq!(validate_project_key(" app ").unwrap(), "APP");
        assert_eq!(validate_project_key("OPS_2").unwrap(), "OPS_2");
        assert!(validate_project_key("2FA").is_err());
        assert!(validate_project_key("APP OR project = X").is_err());
        assert!(validate_project_key("").is_err());
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(quote(r#"Release "Q3" \ final"#), r#""Release \"Q3\" \\ final""#);
    }

    #[test]
    fn builds_version_and_sprint_queries() {
        assert_eq!(
            scope_query("APP", &fix_version_clause("1.2.0"), &[]),
            r#"project = APP AND fixVersion = "1.2.0" ORDER BY created ASC"#
        );
        assert_eq!(
            scope_query(
                "APP",
                &sprint_clause(31),
                &["Story".to_string(), "Bug".to_string()]
            ),
            r#"project = APP AND sprint = 31 AND issuetype in ("Story", "Bug") ORDER BY created ASC"#
        );
    }
}
