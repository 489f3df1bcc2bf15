//! User profile returned by the `myself` endpoint.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Represents the authenticated Atlassian account: id, display name, e-mail (may be hidden by privacy settings) and time zone.
pub struct UserProfile {
    pub account_id: Option<String>,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub time_zone: Option<String>,
}

impl UserProfile {
    /// Returns the best available human-readable name.
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.email_address.clone())
            .or_else(|| self.account_id.clone())
            .unwrap_or_else(|| "unknown user".to_string())
    }
}
