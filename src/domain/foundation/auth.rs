//! Authentication types for the domain layer.
//!
//! The auth service reports failures in its own vocabulary; adapters map
//! them onto [`AuthError`] so the screens can show one fixed message per
//! category.

use super::UserId;
use thiserror::Error;

/// A signed-in user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable user id issued by the auth service.
    pub id: UserId,

    /// Email the account was registered with.
    pub email: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// Coarse auth failure categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("invalid email")]
    InvalidEmail,

    #[error("user disabled")]
    UserDisabled,

    #[error("email already in use")]
    EmailAlreadyInUse,

    #[error("weak password")]
    WeakPassword,

    #[error("network error: {0}")]
    Network(String),

    #[error("auth not configured: {0}")]
    Configuration(String),

    #[error("{0}")]
    Unknown(String),
}

impl AuthError {
    /// Creates a network error with a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::UserNotFound => "No account found with this email".to_string(),
            AuthError::WrongPassword => "Incorrect password".to_string(),
            AuthError::InvalidEmail => "Invalid email address".to_string(),
            AuthError::UserDisabled => "This account has been disabled".to_string(),
            AuthError::EmailAlreadyInUse => "Email is already registered".to_string(),
            AuthError::WeakPassword => "Password is too weak".to_string(),
            AuthError::Network(_) => {
                "Network error. Please check your internet connection.".to_string()
            }
            AuthError::Configuration(_) => {
                "Authentication is not enabled for this app. Please check the auth service configuration."
                    .to_string()
            }
            AuthError::Unknown(detail) => format!("Authentication failed: {}", detail),
        }
    }
}
