use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::auth::Credentials;

/// Admin login form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub username: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Username and password are required")]
    Validation(#[from] ValidationErrors),
}

impl TryFrom<LoginForm> for Credentials {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        // Passwords are sent verbatim; only the username is trimmed.
        Ok(Self {
            username: value.username.trim().to_string(),
            password: value.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_password_untouched() {
        let form = LoginForm {
            username: " admin ".into(),
            password: " admin123 ".into(),
        };
        let credentials: Credentials = form.try_into().unwrap();
        assert_eq!(credentials.username, "admin");
        assert_eq!(credentials.password, " admin123 ");
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(Credentials::try_from(LoginForm::default()).is_err());
    }
}
