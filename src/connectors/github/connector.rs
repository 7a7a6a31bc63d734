// connectors/github/connector.rs
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::warn;

use crate::config::{ConfigError, ConfigSlot};
use crate::plugin::{
    ConfigField, ConfigFieldKind, Connector, ExternalLoginUser, LoginError, PluginInfo,
};
use crate::utils::state::generate_login_state;

use super::client::GitHubOAuthClient;
use super::errors::GitHubAuthError;
use super::models::{GitHubToken, GithubConfig};
use super::service::GitHubOAuthService;

const GITHUB_AUTH_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_SCOPE: &str = "user:email";

const LOGO_SVG: &str = "PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSIyNCIgaGVpZ2h0PSIyNCIgdmlld0JveD0iMCAwIDI0IDI0Ij48cGF0aCBkPSJNMTIgMGMtNi42MjYgMC0xMiA1LjM3My0xMiAxMiAwIDUuMzAyIDMuNDM4IDkuOCA4LjIwNyAxMS4zODcuNTk5LjExMS43OTMtLjI2MS43OTMtLjU3N3YtMi4yMzRjLTMuMzM4LjcyNi00LjAzMy0xLjQxNi00LjAzMy0xLjQxNi0uNTQ2LTEuMzg3LTEuMzMzLTEuNzU2LTEuMzMzLTEuNzU2LTEuMDg5LS43NDUuMDgzLS43MjkuMDgzLS43MjkgMS4yMDUuMDg0IDEuODM5IDEuMjM3IDEuODM5IDEuMjM3IDEuMDcgMS44MzQgMi44MDcgMS4zMDQgMy40OTIuOTk3LjEwNy0uNzc1LjQxOC0xLjMwNS43NjItMS42MDQtMi42NjUtLjMwNS01LjQ2Ny0xLjMzNC01LjQ2Ny01LjkzMSAwLTEuMzExLjQ2OS0yLjM4MSAxLjIzNi0zLjIyMS0uMTI0LS4zMDMtLjUzNS0xLjUyNC4xMTctMy4xNzYgMCAwIDEuMDA4LS4zMjIgMy4zMDEgMS4yMy45NTctLjI2NiAxLjk4My0uMzk5IDMuMDAzLS40MDQgMS4wMi4wMDUgMi4wNDcuMTM4IDMuMDA2LjQwNCAyLjI5MS0xLjU1MiAzLjI5Ny0xLjIzIDMuMjk3LTEuMjMuNjUzIDEuNjUzLjI0MiAyLjg3NC4xMTggMy4xNzYuNzcuODQgMS4yMzUgMS45MTEgMS4yMzUgMy4yMjEgMCA0LjYwOS0yLjgwNyA1LjYyNC01LjQ3OSA1LjkyMS40My4zNzIuODIzIDEuMTAyLjgyMyAyLjIyMnYzLjI5M2MwIC4zMTkuMTkyLjY5NC44MDEuNTc2IDQuNzY1LTEuNTg5IDguMTk5LTYuMDg2IDguMTk5LTExLjM4NiAwLTYuNjI3LTUuMzczLTEyLTEyLTEyeiIvPjwvc3ZnPg==";

/// GitHub OAuth2 login connector.
pub struct GithubConnector {
    service: Arc<dyn GitHubOAuthService>,
    config: ConfigSlot<GithubConfig>,
}

impl GithubConnector {
    pub fn new() -> Self {
        Self::with_service(Arc::new(GitHubOAuthClient::new()))
    }

    /// Builds a connector over a custom API surface; tests use this to swap
    /// the network out.
    pub fn with_service(service: Arc<dyn GitHubOAuthService>) -> Self {
        Self {
            service,
            config: ConfigSlot::default(),
        }
    }

    /// Prefers the primary address from the authenticated email listing over
    /// whatever the profile carried. Accounts with restricted email privacy
    /// legitimately resolve to an empty address; the login proceeds either
    /// way because identity rests on the external id, not the email.
    async fn resolve_email(&self, profile_email: &str, token: &GitHubToken) -> String {
        match self.service.list_emails(token).await {
            Ok(emails) => emails
                .into_iter()
                .find(|e| e.primary)
                .map(|e| e.email)
                .unwrap_or_else(|| profile_email.to_string()),
            Err(err) => {
                warn!(%err, "github email lookup failed, continuing without it");
                profile_email.to_string()
            }
        }
    }
}

impl Default for GithubConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for GithubConnector {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: "GitHub",
            slug_name: "github_connector",
            description: "Sign in with your GitHub account",
            author: "quorum-dev",
            version: "1.2.6",
            link: "https://github.com/quorum-oss/quorum-plugins/tree/main/connector-github",
        }
    }

    fn logo_svg(&self) -> &'static str {
        LOGO_SVG
    }

    fn slug(&self) -> &'static str {
        "github"
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        let config = self.config.current();
        vec![
            ConfigField {
                name: "client_id",
                kind: ConfigFieldKind::Input,
                title: "Client ID",
                description: "Client ID of your GitHub OAuth application",
                required: true,
                value: config.client_id.clone(),
                options: Vec::new(),
            },
            ConfigField {
                name: "client_secret",
                kind: ConfigFieldKind::Input,
                title: "Client Secret",
                description: "Client secret of your GitHub OAuth application",
                required: true,
                value: config.client_secret.clone(),
                options: Vec::new(),
            },
        ]
    }

    fn apply_config(&self, raw: &[u8]) -> Result<(), ConfigError> {
        self.config.replace_from_slice(raw)
    }

    fn authorization_url(&self, callback_url: &str) -> String {
        let config = self.config.current();
        let mut url = Url::parse(GITHUB_AUTH_URL).expect("valid github auth url");
        url.query_pairs_mut()
            .append_pair("client_id", &config.client_id)
            .append_pair("redirect_uri", callback_url)
            .append_pair("scope", GITHUB_SCOPE)
            .append_pair("state", &generate_login_state());
        url.to_string()
    }

    async fn complete_login(&self, code: &str) -> Result<ExternalLoginUser, LoginError> {
        if code.is_empty() {
            return Err(LoginError::AuthExchange);
        }

        let config = self.config.current();
        let token = self.service.exchange_code_for_token(&config, code).await?;
        let profile = self.service.fetch_user(&token).await?;

        let mut user = normalize_profile(&profile)?;
        user.email = self.resolve_email(&user.email, &token).await;
        Ok(user)
    }
}

/// Maps the raw profile payload into the host record. The numeric account id
/// is stringified; optional fields map to empty strings so downstream string
/// handling stays uniform.
fn normalize_profile(profile: &Value) -> Result<ExternalLoginUser, LoginError> {
    let external_id = match &profile["id"] {
        Value::Number(id) => id.to_string(),
        Value::String(id) if !id.is_empty() => id.clone(),
        _ => return Err(GitHubAuthError::InvalidUserInfo.into()),
    };

    Ok(ExternalLoginUser {
        external_id,
        display_name: profile["name"].as_str().unwrap_or("").to_string(),
        username: profile["login"].as_str().unwrap_or("").to_string(),
        email: profile["email"].as_str().unwrap_or("").to_string(),
        avatar: profile["avatar_url"].as_str().unwrap_or("").to_string(),
        meta_info: profile.to_string(),
    })
}
