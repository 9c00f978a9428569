//! Client-side checks for the account forms.
//!
//! Each form checks its fields in the order they appear on screen and
//! reports the first problem only.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::ValidationError;

/// Rules a new account has to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPolicy {
    /// Required email domain, without the `@`.
    pub email_domain: String,
    pub min_password_length: usize,
}

impl RegistrationPolicy {
    pub fn new(email_domain: impl Into<String>, min_password_length: usize) -> Self {
        Self {
            email_domain: email_domain.into(),
            min_password_length,
        }
    }

    /// Case-insensitive check that `email` ends with `@<email_domain>`.
    ///
    /// Surrounding whitespace is ignored, matching how the forms trim the
    /// address before it reaches the auth service.
    pub fn email_in_domain(&self, email: &str) -> bool {
        let suffix = format!("@{}", self.email_domain.to_lowercase());
        email.trim().to_lowercase().ends_with(&suffix)
    }

    pub fn check_email(&self, email: &str) -> Result<(), ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("Email"));
        }
        if !self.email_in_domain(email) {
            return Err(ValidationError::email_domain(&self.email_domain));
        }
        Ok(())
    }

    /// Checks a new password and its confirmation.
    pub fn check_password(
        &self,
        label: &str,
        password: &SecretString,
        confirmation: &SecretString,
    ) -> Result<(), ValidationError> {
        let password = password.expose_secret();
        if password.trim().is_empty() {
            return Err(ValidationError::empty_field(label));
        }
        if password.chars().count() < self.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.min_password_length,
            });
        }
        if password != confirmation.expose_secret() {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self::new("siswa.ukm.edu.my", 6)
    }
}

/// Registration screen input.
#[derive(Debug)]
pub struct RegistrationForm {
    pub email: String,
    pub matric_number: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegistrationForm {
    pub fn new(
        email: impl Into<String>,
        matric_number: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            matric_number: matric_number.into(),
            password: SecretString::new(password.into()),
            confirm_password: SecretString::new(confirm_password.into()),
        }
    }

    pub fn validate(&self, policy: &RegistrationPolicy) -> Result<(), ValidationError> {
        policy.check_email(&self.email)?;
        if self.matric_number.trim().is_empty() {
            return Err(ValidationError::empty_field("Matric number"));
        }
        policy.check_password("Password", &self.password, &self.confirm_password)
    }
}

/// Login screen input.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

/// Change-password dialog input.
#[derive(Debug)]
pub struct PasswordChangeForm {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

impl PasswordChangeForm {
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            current_password: SecretString::new(current_password.into()),
            new_password: SecretString::new(new_password.into()),
            confirm_password: SecretString::new(confirm_password.into()),
        }
    }

    pub fn validate(&self, policy: &RegistrationPolicy) -> Result<(), ValidationError> {
        if self.current_password.expose_secret().trim().is_empty() {
            return Err(ValidationError::empty_field("Current password"));
        }
        policy.check_password("New password", &self.new_password, &self.confirm_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn policy() -> RegistrationPolicy {
        RegistrationPolicy::default()
    }

    fn form(email: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm::new(email, "A123456", password, confirm)
    }

    #[test]
    fn university_email_passes_domain_check() {
        assert!(policy().check_email("student@siswa.ukm.edu.my").is_ok());
        assert!(policy().check_email("Student@SISWA.UKM.EDU.MY").is_ok());
    }

    #[test]
    fn surrounding_whitespace_is_ignored_by_domain_check() {
        assert!(policy().email_in_domain("  student@siswa.ukm.edu.my\n"));
        assert!(!policy().email_in_domain("student@siswa.ukm.edu.my.evil"));
    }

    #[test]
    fn other_domain_fails_with_domain_error() {
        let err = policy().check_email("student@gmail.com").unwrap_err();
        assert_eq!(err, ValidationError::email_domain("siswa.ukm.edu.my"));
        assert_eq!(err.to_string(), "Email must end with @siswa.ukm.edu.my");
    }

    #[test]
    fn blank_email_is_reported_before_domain() {
        let err = form("  ", "secret1", "secret1").validate(&policy()).unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn short_password_fails_length_check() {
        let err = form("a@siswa.ukm.edu.my", "abc", "abc")
            .validate(&policy())
            .unwrap_err();
        assert_eq!(err, ValidationError::PasswordTooShort { min: 6 });
    }

    #[test]
    fn mismatched_confirmation_is_a_distinct_error() {
        let err = form("a@siswa.ukm.edu.my", "secret1", "secret2")
            .validate(&policy())
            .unwrap_err();
        assert_eq!(err, ValidationError::PasswordMismatch);
    }

    #[test]
    fn missing_matric_number_is_reported() {
        let form = RegistrationForm::new("a@siswa.ukm.edu.my", "", "secret1", "secret1");
        assert_eq!(
            form.validate(&policy()).unwrap_err().to_string(),
            "Matric number is required"
        );
    }

    #[test]
    fn complete_registration_passes() {
        assert!(form("a@siswa.ukm.edu.my", "secret1", "secret1")
            .validate(&policy())
            .is_ok());
    }

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(
            LoginForm::new("a@b.c", "").validate().unwrap_err(),
            ValidationError::MissingCredentials
        );
        assert!(LoginForm::new("a@b.c", "pw").validate().is_ok());
    }

    #[test]
    fn password_change_requires_current_password() {
        let form = PasswordChangeForm::new("", "newpass1", "newpass1");
        assert_eq!(
            form.validate(&policy()).unwrap_err().to_string(),
            "Current password is required"
        );
    }

    #[test]
    fn password_change_applies_length_and_match_rules() {
        let short = PasswordChangeForm::new("old", "new", "new");
        assert_eq!(
            short.validate(&policy()).unwrap_err(),
            ValidationError::PasswordTooShort { min: 6 }
        );

        let mismatch = PasswordChangeForm::new("old", "newpass1", "newpass2");
        assert_eq!(
            mismatch.validate(&policy()).unwrap_err(),
            ValidationError::PasswordMismatch
        );
    }

    #[test]
    fn custom_policy_changes_domain_and_length() {
        let policy = RegistrationPolicy::new("tutors.example.org", 10);
        assert!(policy.check_email("x@tutors.example.org").is_ok());
        assert!(policy.check_email("x@siswa.ukm.edu.my").is_err());

        let pw = SecretString::new("ninechars".to_string());
        let confirm = SecretString::new("ninechars".to_string());
        assert_eq!(
            policy.check_password("Password", &pw, &confirm).unwrap_err(),
            ValidationError::PasswordTooShort { min: 10 }
        );
    }

    proptest! {
        #[test]
        fn any_local_part_in_domain_passes(local in "[a-zA-Z0-9._]{1,20}") {
            let email = format!("{}@siswa.ukm.edu.my", local);
            prop_assert!(policy().check_email(&email).is_ok());
        }

        #[test]
        fn passwords_under_minimum_always_fail(pw in "[a-zA-Z0-9]{1,5}") {
            let secret = SecretString::new(pw.clone());
            let confirm = SecretString::new(pw);
            prop_assert_eq!(
                policy().check_password("Password", &secret, &confirm),
                Err(ValidationError::PasswordTooShort { min: 6 })
            );
        }
    }
}
