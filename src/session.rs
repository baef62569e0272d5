//! Cookie-backed storage of the admin access token.
//!
//! Handlers receive a [`SessionContext`] and turn it into an explicit
//! [`AdminSession`] which is then bound to the API client.

use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionInsertError, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::auth::AdminSession;
use crate::domain::types::AccessToken;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const SESSION_COOKIE_NAME: &str = "session";

/// Private (encrypted) session cookie signed with `key`.
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Thin wrapper over the actix session exposing token operations only.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Session context for this request. Unreadable or blank tokens count as
    /// anonymous.
    pub fn admin(&self) -> AdminSession {
        match self.0.get::<String>(ACCESS_TOKEN_KEY) {
            Ok(Some(raw)) => match AccessToken::new(raw) {
                Ok(token) => AdminSession::authenticated(token),
                Err(e) => {
                    log::warn!("Ignoring invalid access token in session: {e}");
                    AdminSession::anonymous()
                }
            },
            Ok(None) => AdminSession::anonymous(),
            Err(e) => {
                log::warn!("Failed to read session: {e}");
                AdminSession::anonymous()
            }
        }
    }

    pub fn persist_token(&self, token: &AccessToken) -> Result<(), SessionInsertError> {
        self.0.insert(ACCESS_TOKEN_KEY, token.as_str())
    }

    pub fn clear_token(&self) {
        self.0.remove(ACCESS_TOKEN_KEY);
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
