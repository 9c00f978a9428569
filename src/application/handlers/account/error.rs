//! Failures of the account commands.

use thiserror::Error;

use crate::domain::foundation::{AuthError, ValidationError};
use crate::ports::StoreError;

/// Why an account command did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Rejected before contacting any service.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AccountError {
    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AccountError::Validation(e) => e.to_string(),
            AccountError::Auth(e) => e.user_message(),
            AccountError::Store(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_show_their_category_message() {
        let err = AccountError::from(AuthError::WrongPassword);
        assert_eq!(err.user_message(), "Incorrect password");
    }

    #[test]
    fn validation_errors_show_the_rule() {
        let err = AccountError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.user_message(), "Passwords do not match");
    }
}
