use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Static metadata the host plugin registry reads at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    pub slug_name: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub version: &'static str,
    pub link: &'static str,
}

/// How the host settings form renders a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigFieldKind {
    Input,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One entry of a connector's configuration schema. `value` reflects the
/// currently applied configuration so the settings form can round-trip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigField {
    pub name: &'static str,
    pub kind: ConfigFieldKind,
    pub title: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ConfigFieldOption>,
}

/// Normalized identity handed to the host after a successful login.
///
/// Absent provider fields become empty strings, never nulls. `external_id`
/// is the provider's stable account id and the only field identity may rest
/// on; names and emails change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLoginUser {
    pub external_id: String,
    pub display_name: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub meta_info: String,
}

/// Terminal failure of one login attempt. The host shows a generic retry
/// message; detail goes to the log, not to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    AuthExchange,
    ProfileFetch,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::AuthExchange => write!(f, "authorization code exchange failed"),
            LoginError::ProfileFetch => write!(f, "failed to fetch the provider user profile"),
        }
    }
}

impl std::error::Error for LoginError {}

/// One provider's social-login flow behind the host's plugin surface.
///
/// `authorization_url` and `complete_login` are the two OAuth2 legs; the
/// rest is metadata and configuration plumbing invoked by the host registry.
#[async_trait]
pub trait Connector: Send + Sync {
    fn info(&self) -> PluginInfo;

    /// Base64-encoded SVG shown on the login button.
    fn logo_svg(&self) -> &'static str;

    /// Short name used in the host's callback route.
    fn slug(&self) -> &'static str;

    /// Configuration schema, in display order.
    fn config_fields(&self) -> Vec<ConfigField>;

    /// Replaces the active configuration from a serialized payload. The
    /// previous configuration stays in effect when parsing fails.
    fn apply_config(&self, raw: &[u8]) -> Result<(), ConfigError>;

    /// Absolute provider consent URL the host redirects the browser to.
    /// `callback_url` is where the provider sends the user back.
    fn authorization_url(&self, callback_url: &str) -> String;

    /// Trades the callback authorization code for a normalized user profile.
    async fn complete_login(&self, code: &str) -> Result<ExternalLoginUser, LoginError>;
}
