// connectors/github/models.rs
use serde::Deserialize;
use time::OffsetDateTime;

/// OAuth application credentials, applied by the host administrator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// Result of trading an authorization code for credentials. Held in memory
/// for the duration of one login attempt, then discarded.
#[derive(Debug, Clone, Default)]
pub struct GitHubToken {
    pub access_token: String,
    pub expires_at: Option<OffsetDateTime>,
}

/// One entry of the authenticated email listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubEmail {
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub verified: bool,
}
