use serde::Deserialize;

use crate::domain::types::AccessToken;

/// Username and password submitted to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: AccessToken,
}

/// Response carrying a human readable message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Explicit admin session context.
///
/// Built per request from the cookie session and handed to the API client
/// constructor. Token presence is the only authentication signal; expiry is
/// left to the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSession {
    token: Option<AccessToken>,
}

impl AdminSession {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn authenticated(token: AccessToken) -> Self {
        Self { token: Some(token) }
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_has_no_token() {
        let session = AdminSession::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn token_response_reads_bearer_token() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc.def", "token_type": "bearer"}"#)
                .unwrap();
        let session = AdminSession::authenticated(response.access_token);
        assert_eq!(session.token().unwrap().as_str(), "abc.def");
    }
}
