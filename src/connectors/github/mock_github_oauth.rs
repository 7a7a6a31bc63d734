use async_trait::async_trait;
use serde_json::Value;

use super::errors::GitHubAuthError;
use super::models::{GitHubEmail, GitHubToken, GithubConfig};
use super::service::GitHubOAuthService;

/// Happy-path stand-in for the GitHub API. Failure scenarios declare their
/// own one-off impls next to the test that needs them.
#[derive(Default)]
pub struct MockGitHubOAuth {
    pub token: GitHubToken,
    pub user: Value,
    pub emails: Vec<GitHubEmail>,
}

#[async_trait]
impl GitHubOAuthService for MockGitHubOAuth {
    async fn exchange_code_for_token(
        &self,
        _config: &GithubConfig,
        _code: &str,
    ) -> Result<GitHubToken, GitHubAuthError> {
        Ok(self.token.clone())
    }

    async fn fetch_user(&self, _token: &GitHubToken) -> Result<Value, GitHubAuthError> {
        Ok(self.user.clone())
    }

    async fn list_emails(
        &self,
        _token: &GitHubToken,
    ) -> Result<Vec<GitHubEmail>, GitHubAuthError> {
        Ok(self.emails.clone())
    }
}
