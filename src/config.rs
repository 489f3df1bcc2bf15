//! Persistent report configuration and file-backed manager.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jira_api::JiraConfig;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mapping::{
    EstimateField, EstimateUnit, DEFAULT_ESTIMATE_FIELD_ID, DEFAULT_ESTIMATE_FIELD_NAME,
};

pub const ENV_SERVER: &str = "JIRA_SERVER";
pub const ENV_EMAIL: &str = "JIRA_EMAIL";
pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const ENV_PROJECT_KEY: &str = "JIRA_PROJECT_KEY";

/// Settings persisted on disk; every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Option<String>,
    pub email: Option<String>,
    pub api_token: Option<String>,
    pub project_key: Option<String>,
    pub estimate_field_id: String,
    pub estimate_field_name: String,
    pub estimate_unit: EstimateUnit,
    pub done_statuses: Vec<String>,
    pub issue_types: Vec<String>,
    pub page_size: u32,
    pub cooldown_ms: u64,
    pub max_in_flight: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            email: None,
            api_token: None,
            project_key: None,
            estimate_field_id: DEFAULT_ESTIMATE_FIELD_ID.to_string(),
            estimate_field_name: DEFAULT_ESTIMATE_FIELD_NAME.to_string(),
            estimate_unit: EstimateUnit::default(),
            done_statuses: vec!["Done".to_string()],
            issue_types: Vec::new(),
            page_size: jira_api::config::DEFAULT_PAGE_SIZE,
            cooldown_ms: jira_api::config::DEFAULT_COOLDOWN_MS,
            max_in_flight: jira_api::config::DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

impl Config {
    /// Overrides file values with non-empty environment variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(server) = read(ENV_SERVER) {
            self.server = Some(server);
        }
        if let Some(email) = read(ENV_EMAIL) {
            self.email = Some(email);
        }
        if let Some(token) = read(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(project) = read(ENV_PROJECT_KEY) {
            self.project_key = Some(project);
        }
    }

    pub fn estimate_field(&self) -> EstimateField {
        EstimateField {
            id: self.estimate_field_id.clone(),
            name: self.estimate_field_name.clone(),
            unit: self.estimate_unit,
        }
    }

    /// Client settings; without an e-mail the token is sent as a bearer token.
    pub fn jira_config(&self) -> Result<JiraConfig, ConfigError> {
        let server = self
            .server
            .as_deref()
            .filter(|server| !server.trim().is_empty())
            .ok_or(ConfigError::Missing {
                what: "Jira server URL",
                hint: "set JIRA_SERVER or run `version-report config --server URL`",
            })?;
        let token = self
            .api_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing {
                what: "Jira API token",
                hint: "set JIRA_API_TOKEN (or put it in .env)",
            })?;

        let config = match self.email.as_deref() {
            Some(email) => JiraConfig::new(server, email, token),
            None => {
                debug!("no e-mail configured, using bearer authentication");
                JiraConfig::new(server, "", token).with_bearer_token(token)
            }
        };
        Ok(config
            .with_page_size(self.page_size)
            .with_cooldown(Duration::from_millis(self.cooldown_ms))
            .with_max_in_flight(self.max_in_flight))
    }

    /// Copy safe to print.
    pub fn masked(&self) -> Config {
        let mut masked = self.clone();
        if masked.api_token.is_some() {
            masked.api_token = Some("********".to_string());
        }
        masked
    }
}

/// Loads and saves `Config` as JSON in the platform config directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = directories::ProjectDirs::from("", "", "jira-version-report")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::at(dirs.config_dir().join("config.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means defaults; an unreadable one is reported and ignored.
    pub fn load(&self) -> Config {
        if !self.path.exists() {
            debug!("no config file at {}", self.path.display());
            return Config::default();
        }
        let parsed = fs::read_to_string(&self.path)
            .map_err(|err| err.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|err| err.to_string()));
        match parsed {
            Ok(config) => config,
            Err(err) => {
                warn!("ignoring config file {}: {}", self.path.display(), err);
                Config::default()
            }
        }
    }

    /// Persists config to disk, creating parent directories when needed.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let write = || -> io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(config)?;
            fs::write(&self.path, content)
        };
        write().map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigManager, ENV_API_TOKEN, ENV_EMAIL, ENV_SERVER};
    use crate::error::ConfigError;
    use crate::mapping::EstimateUnit;
    use jira_api::AuthMethod;
    use std::collections::HashMap;
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn unique_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        env::temp_dir().join(format!("version-report-tests-{name}-{nanos}/config.json"))
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.estimate_field_id, "customfield_10016");
        assert_eq!(config.estimate_unit, EstimateUnit::Points);
        assert_eq!(config.done_statuses, vec!["Done".to_string()]);
        assert_eq!(config.page_size, 100);
        assert!(config.server.is_none());
    }

    #[test]
    fn load_missing_file_returns_default() {
        let manager = ConfigManager::at(unique_path("missing"));
        assert_eq!(manager.load(), Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let path = unique_path("partial");
        let parent = path.parent().expect("parent must exist").to_owned();
        fs::create_dir_all(&parent).expect("create temp directory");
        fs::write(
            &path,
            r#"{"server": "https://acme.atlassian.net", "estimate_unit": "seconds"}"#,
        )
        .expect("write config");

        let loaded = ConfigManager::at(&path).load();
        assert_eq!(loaded.server.as_deref(), Some("https://acme.atlassian.net"));
        assert_eq!(loaded.estimate_unit, EstimateUnit::Seconds);
        assert_eq!(loaded.done_statuses, vec!["Done".to_string()]);

        let _ = fs::remove_dir_all(parent);
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = unique_path("roundtrip");
        let parent = path.parent().map(ToOwned::to_owned);

        let manager = ConfigManager::at(path.clone());
        let config = Config {
            server: Some("https://acme.atlassian.net".to_string()),
            project_key: Some("APP".to_string()),
            issue_types: vec!["Story".to_string(), "Bug".to_string()],
            cooldown_ms: 250,
            ..Config::default()
        };

        manager.save(&config).expect("save should succeed");
        assert_eq!(manager.load(), config);

        if let Some(parent) = parent {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn load_invalid_json_falls_back_to_default() {
        let path = unique_path("invalid");
        let parent = path.parent().expect("parent must exist");
        fs::create_dir_all(parent).expect("create temp directory");
        fs::write(&path, "not-valid-json").expect("write invalid config");

        let loaded = ConfigManager::at(path.clone()).load();
        assert_eq!(loaded, Config::default());

        let _ = fs::remove_dir_all(parent);
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = Config {
            server: Some("https://old.example".to_string()),
            email: Some("old@acme.io".to_string()),
            ..Config::default()
        };
        config.apply_env(env_of(&[
            (ENV_SERVER, "https://acme.atlassian.net"),
            (ENV_EMAIL, "  "),
            (ENV_API_TOKEN, "secret"),
        ]));

        assert_eq!(config.server.as_deref(), Some("https://acme.atlassian.net"));
        assert_eq!(config.email.as_deref(), Some("old@acme.io"));
        assert_eq!(config.api_token.as_deref(), Some("secret"));
    }

    #[test]
    fn jira_config_requires_server_and_token() {
        let err = Config::default().jira_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { what: "Jira server URL", .. }));

        let config = Config {
            server: Some("https://acme.atlassian.net".to_string()),
            ..Config::default()
        };
        let err = config.jira_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { what: "Jira API token", .. }));
    }

    #[test]
    fn jira_config_picks_auth_method_and_limits() {
        let config = Config {
            server: Some("https://acme.atlassian.net".to_string()),
            email: Some("me@acme.io".to_string()),
            api_token: Some("secret".to_string()),
            cooldown_ms: 0,
            max_in_flight: 0,
            ..Config::default()
        };
        let jira = config.jira_config().unwrap();
        assert_eq!(jira.auth_method, AuthMethod::Basic);
        assert_eq!(jira.cooldown, Duration::ZERO);
        assert_eq!(jira.max_in_flight, 1);

        let bearer = Config {
            email: None,
            ..config
        }
        .jira_config()
        .unwrap();
        assert_eq!(bearer.auth_method, AuthMethod::Bearer);
        assert_eq!(bearer.email, None);
    }

    #[test]
    fn masked_hides_the_token() {
        let config = Config {
            api_token: Some("secret".to_string()),
            ..Config::default()
        };
        assert_eq!(config.masked().api_token.as_deref(), Some("********"));
        assert_eq!(Config::default().masked().api_token, None);
    }
}
