use crate::domain::auth::AdminSession;

pub mod advertisements;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod errors;
pub mod offers;

pub use errors::{ServiceError, ServiceResult};

/// Admin operations require a token in the session.
///
/// This is the only check made before calling admin endpoints; validity of
/// the token is left to the API.
pub fn ensure_admin(session: &AdminSession) -> ServiceResult<()> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}
