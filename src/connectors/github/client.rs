// connectors/github/client.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use time::OffsetDateTime;

use super::errors::GitHubAuthError;
use super::models::{GitHubEmail, GitHubToken, GithubConfig};
use super::service::GitHubOAuthService;

const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";
const GITHUB_EMAILS_URL: &str = "https://api.github.com/user/emails";

/// Upper bound on each provider round-trip so an unresponsive provider
/// cannot pin a request-handling task indefinitely.
pub const PROVIDER_TIMEOUT_SECS: u64 = 15;

// GitHub's REST API rejects requests without a User-Agent.
const USER_AGENT: &str = "quorum-connectors";

pub struct GitHubOAuthClient {
    client: Client,
}

impl GitHubOAuthClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn exchange_with_endpoint(
        &self,
        token_url: &str,
        config: &GithubConfig,
        code: &str,
    ) -> Result<GitHubToken, GitHubAuthError> {
        let res = self
            .client
            .post(token_url)
            .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            // Needed to get a JSON response instead of a form-encoded body
            .header("Accept", "application/json")
            .form(&[
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|_| GitHubAuthError::TokenExchangeFailed)?;

        if !res.status().is_success() {
            return Err(GitHubAuthError::TokenExchangeFailed);
        }

        let json: Value = res
            .json()
            .await
            .map_err(|_| GitHubAuthError::InvalidTokenJson)?;

        // GitHub reports a spent or mismatched code as 200 + error payload
        if let Some(error) = json["error"].as_str() {
            tracing::warn!(error, "github token endpoint rejected the authorization code");
            return Err(GitHubAuthError::TokenExchangeFailed);
        }

        let access_token = json["access_token"]
            .as_str()
            .ok_or(GitHubAuthError::InvalidTokenJson)?;
        let expires_at = json["expires_in"]
            .as_i64()
            .map(|secs| OffsetDateTime::now_utc() + time::Duration::seconds(secs));

        Ok(GitHubToken {
            access_token: access_token.to_string(),
            expires_at,
        })
    }

    async fn fetch_user_with_endpoint(
        &self,
        user_url: &str,
        token: &GitHubToken,
    ) -> Result<Value, GitHubAuthError> {
        let res = self
            .client
            .get(user_url)
            .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            .bearer_auth(&token.access_token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|_| GitHubAuthError::UserInfoFetchFailed)?;

        if !res.status().is_success() {
            return Err(GitHubAuthError::UserInfoFetchFailed);
        }

        res.json()
            .await
            .map_err(|_| GitHubAuthError::InvalidUserInfo)
    }

    async fn list_emails_with_endpoint(
        &self,
        emails_url: &str,
        token: &GitHubToken,
    ) -> Result<Vec<GitHubEmail>, GitHubAuthError> {
        let res = self
            .client
            .get(emails_url)
            .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            .bearer_auth(&token.access_token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|_| GitHubAuthError::EmailFetchFailed)?;

        if !res.status().is_success() {
            return Err(GitHubAuthError::EmailFetchFailed);
        }

        res.json()
            .await
            .map_err(|_| GitHubAuthError::EmailFetchFailed)
    }
}

impl Default for GitHubOAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitHubOAuthService for GitHubOAuthClient {
    async fn exchange_code_for_token(
        &self,
        config: &GithubConfig,
        code: &str,
    ) -> Result<GitHubToken, GitHubAuthError> {
        self.exchange_with_endpoint(GITHUB_TOKEN_URL, config, code)
            .await
    }

    async fn fetch_user(&self, token: &GitHubToken) -> Result<Value, GitHubAuthError> {
        self.fetch_user_with_endpoint(GITHUB_USER_URL, token).await
    }

    async fn list_emails(
        &self,
        token: &GitHubToken,
    ) -> Result<Vec<GitHubEmail>, GitHubAuthError> {
        self.list_emails_with_endpoint(GITHUB_EMAILS_URL, token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GithubConfig {
        GithubConfig {
            client_id: "abc".into(),
            client_secret: "xyz".into(),
        }
    }

    fn test_token() -> GitHubToken {
        GitHubToken {
            access_token: "tok1".into(),
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn exchange_parses_access_token() {
        let server = httpmock::MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/login/oauth/access_token")
                .header("accept", "application/json")
                .body_contains("client_id=abc")
                .body_contains("code=goodcode")
                .body_contains("grant_type=authorization_code");
            then.status(200).json_body(serde_json::json!({
                "access_token": "tok1",
                "token_type": "bearer",
                "scope": "user:email"
            }));
        });

        let client = GitHubOAuthClient::new();
        let token = client
            .exchange_with_endpoint(
                &server.url("/login/oauth/access_token"),
                &test_config(),
                "goodcode",
            )
            .await
            .expect("exchange should succeed");

        mock.assert();
        assert_eq!(token.access_token, "tok1");
        assert!(token.expires_at.is_none());
    }

    #[tokio::test]
    async fn exchange_tracks_expiry_when_reported() {
        let server = httpmock::MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/token");
            then.status(200).json_body(serde_json::json!({
                "access_token": "tok1",
                "expires_in": 28800
            }));
        });

        let client = GitHubOAuthClient::new();
        let token = client
            .exchange_with_endpoint(&server.url("/token"), &test_config(), "goodcode")
            .await
            .expect("exchange should succeed");

        let expires_at = token.expires_at.expect("expiry should be recorded");
        assert!(expires_at > OffsetDateTime::now_utc());
    }

    #[tokio::test]
    async fn exchange_fails_on_error_status() {
        let server = httpmock::MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/token");
            then.status(400);
        });

        let client = GitHubOAuthClient::new();
        let err = client
            .exchange_with_endpoint(&server.url("/token"), &test_config(), "badcode")
            .await
            .expect_err("error status should fail the exchange");

        assert_eq!(err, GitHubAuthError::TokenExchangeFailed);
    }

    #[tokio::test]
    async fn exchange_fails_on_error_payload() {
        let server = httpmock::MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/token");
            then.status(200).json_body(serde_json::json!({
                "error": "bad_verification_code",
                "error_description": "The code passed is incorrect or expired."
            }));
        });

        let client = GitHubOAuthClient::new();
        let err = client
            .exchange_with_endpoint(&server.url("/token"), &test_config(), "spent")
            .await
            .expect_err("error payload should fail the exchange");

        assert_eq!(err, GitHubAuthError::TokenExchangeFailed);
    }

    #[tokio::test]
    async fn exchange_fails_without_access_token() {
        let server = httpmock::MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/token");
            then.status(200).json_body(serde_json::json!({ "token_type": "bearer" }));
        });

        let client = GitHubOAuthClient::new();
        let err = client
            .exchange_with_endpoint(&server.url("/token"), &test_config(), "goodcode")
            .await
            .expect_err("missing access_token should fail");

        assert_eq!(err, GitHubAuthError::InvalidTokenJson);
    }

    #[tokio::test]
    async fn fetch_user_sends_bearer_and_user_agent() {
        let server = httpmock::MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/user")
                .header("authorization", "Bearer tok1")
                .header("user-agent", USER_AGENT);
            then.status(200).json_body(serde_json::json!({
                "id": 42,
                "login": "alice"
            }));
        });

        let client = GitHubOAuthClient::new();
        let profile = client
            .fetch_user_with_endpoint(&server.url("/user"), &test_token())
            .await
            .expect("profile fetch should succeed");

        mock.assert();
        assert_eq!(profile["login"].as_str(), Some("alice"));
    }

    #[tokio::test]
    async fn fetch_user_fails_on_error_status() {
        let server = httpmock::MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET).path("/user");
            then.status(401);
        });

        let client = GitHubOAuthClient::new();
        let err = client
            .fetch_user_with_endpoint(&server.url("/user"), &test_token())
            .await
            .expect_err("error status should fail the fetch");

        assert_eq!(err, GitHubAuthError::UserInfoFetchFailed);
    }

    #[tokio::test]
    async fn list_emails_tolerates_missing_flags() {
        let server = httpmock::MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET).path("/user/emails");
            then.status(200).json_body(serde_json::json!([
                { "email": "alice@example.com", "primary": true, "verified": true },
                { "email": "alt@example.com" }
            ]));
        });

        let client = GitHubOAuthClient::new();
        let emails = client
            .list_emails_with_endpoint(&server.url("/user/emails"), &test_token())
            .await
            .expect("email listing should succeed");

        assert_eq!(emails.len(), 2);
        assert!(emails[0].primary);
        assert!(!emails[1].primary);
        assert!(!emails[1].verified);
    }

    #[tokio::test]
    async fn list_emails_fails_on_malformed_body() {
        let server = httpmock::MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET).path("/user/emails");
            then.status(200).body("not json");
        });

        let client = GitHubOAuthClient::new();
        let err = client
            .list_emails_with_endpoint(&server.url("/user/emails"), &test_token())
            .await
            .expect_err("malformed body should fail");

        assert_eq!(err, GitHubAuthError::EmailFetchFailed);
    }
}
