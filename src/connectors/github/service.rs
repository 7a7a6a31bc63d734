// connectors/github/service.rs
use async_trait::async_trait;
use serde_json::Value;

use super::errors::GitHubAuthError;
use super::models::{GitHubEmail, GitHubToken, GithubConfig};

/// Outbound GitHub API surface used by the connector. Behind a trait so
/// tests can swap the network out.
///
/// The profile comes back as raw JSON: the connector keeps the full payload
/// for the audit trail in addition to the mapped fields.
#[async_trait]
pub trait GitHubOAuthService: Send + Sync {
    async fn exchange_code_for_token(
        &self,
        config: &GithubConfig,
        code: &str,
    ) -> Result<GitHubToken, GitHubAuthError>;

    async fn fetch_user(&self, token: &GitHubToken) -> Result<Value, GitHubAuthError>;

    async fn list_emails(&self, token: &GitHubToken)
        -> Result<Vec<GitHubEmail>, GitHubAuthError>;
}
