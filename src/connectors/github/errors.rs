// connectors/github/errors.rs
use std::fmt;

use crate::plugin::LoginError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubAuthError {
    TokenExchangeFailed,
    InvalidTokenJson,
    UserInfoFetchFailed,
    InvalidUserInfo,
    EmailFetchFailed,
}

impl fmt::Display for GitHubAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GitHubAuthError::*;
        match self {
            TokenExchangeFailed => write!(f, "GitHub token exchange failed"),
            InvalidTokenJson => write!(f, "Invalid GitHub token response"),
            UserInfoFetchFailed => write!(f, "Failed to fetch GitHub user info"),
            InvalidUserInfo => write!(f, "Invalid GitHub user info"),
            EmailFetchFailed => write!(f, "Failed to fetch GitHub emails"),
        }
    }
}

impl From<GitHubAuthError> for LoginError {
    fn from(err: GitHubAuthError) -> Self {
        match err {
            GitHubAuthError::TokenExchangeFailed | GitHubAuthError::InvalidTokenJson => {
                LoginError::AuthExchange
            }
            // Email listing failures are degraded inside the connector and
            // never surface through this conversion.
            GitHubAuthError::UserInfoFetchFailed
            | GitHubAuthError::InvalidUserInfo
            | GitHubAuthError::EmailFetchFailed => LoginError::ProfileFetch,
        }
    }
}
