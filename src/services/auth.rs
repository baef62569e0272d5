use crate::domain::auth::Credentials;
use crate::domain::types::AccessToken;
use crate::forms::auth::LoginForm;
use crate::repository::AdminAuth;

use super::{ServiceError, ServiceResult};

/// Exchange the login form for an access token.
///
/// Every failure, including blank fields, is reported as
/// [`ServiceError::Unauthorized`].
pub async fn login<R>(form: LoginForm, repo: &R) -> ServiceResult<AccessToken>
where
    R: AdminAuth,
{
    let credentials = Credentials::try_from(form).map_err(|e| {
        log::debug!("Rejected login form: {e}");
        ServiceError::Unauthorized
    })?;

    match repo.login(&credentials).await {
        Ok(token) => {
            log::info!("Admin {} logged in", credentials.username);
            Ok(token)
        }
        Err(e) => {
            log::error!("Login failed for {}: {e}", credentials.username);
            Err(ServiceError::Unauthorized)
        }
    }
}

pub async fn create_default_admin<R>(repo: &R) -> ServiceResult<bool>
where
    R: AdminAuth,
{
    match repo.create_default_admin().await {
        Ok(message) => {
            log::info!("Default admin request: {message}");
            Ok(true)
        }
        Err(e) => {
            log::error!("Failed to create default admin: {e}");
            Ok(false)
        }
    }
}
