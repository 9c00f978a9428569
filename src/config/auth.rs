//! Account rules configuration

use serde::Deserialize;

use crate::domain::account::RegistrationPolicy;

use super::error::ValidationError;

/// Registration and password rules.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Domain every registered email must belong to
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Minimum length of a new password
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl AuthConfig {
    /// Policy the account forms are checked against
    pub fn registration_policy(&self) -> RegistrationPolicy {
        RegistrationPolicy::new(self.email_domain.trim(), self.min_password_length)
    }

    /// Validate account rule configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let domain = self.email_domain.trim();
        if domain.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__EMAIL_DOMAIN"));
        }
        if domain.contains('@') {
            return Err(ValidationError::InvalidEmailDomain);
        }
        if self.min_password_length == 0 || self.min_password_length > 128 {
            return Err(ValidationError::InvalidPasswordLength);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            email_domain: default_email_domain(),
            min_password_length: default_min_password_length(),
        }
    }
}

fn default_email_domain() -> String {
    "siswa.ukm.edu.my".to_string()
}

fn default_min_password_length() -> usize {
    6
}
