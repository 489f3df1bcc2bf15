use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "3";
pub const DEFAULT_AGILE_VERSION: &str = "1.0";
pub const DEFAULT_USER_AGENT: &str = "jira-version-report";
pub const DEFAULT_COOLDOWN_MS: u64 = 100;
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthMethod {
    /// Atlassian account e-mail plus API token.
    Basic,
    /// Personal access token.
    Bearer,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Basic => "Basic",
            AuthMethod::Bearer => "Bearer",
        }
    }
}

#[derive(Clone, Debug)]
pub struct JiraConfig {
    pub base_url: String,
    pub api_version: String,
    pub email: Option<String>,
    pub token: String,
    pub auth_method: AuthMethod,
    pub user_agent: String,
    pub cooldown: Duration,
    pub max_in_flight: usize,
    pub page_size: u32,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl JiraConfig {
    /// Basic-auth config for a Jira Cloud site, the usual setup for API tokens.
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            email: Some(email.into()),
            token: token.into(),
            auth_method: AuthMethod::Basic,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cooldown: Duration::from_millis(DEFAULT_COOLDOWN_MS),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self.email = None;
        self.auth_method = AuthMethod::Bearer;
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn with_cooldown(mut self, duration: Duration) -> Self {
        self.cooldown = duration;
        self
    }

    pub fn with_max_in_flight(mut self, permits: usize) -> Self {
        self.max_in_flight = permits.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    pub fn with_connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = duration;
        self
    }

    pub fn api_root(&self) -> String {
        format!(
            "{}/rest/api/{}/",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    pub fn agile_root(&self) -> String {
        format!(
            "{}/rest/agile/{}/",
            self.base_url.trim_end_matches('/'),
            DEFAULT_AGILE_VERSION
        )
    }
}
