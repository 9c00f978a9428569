//! ChangePasswordHandler - Command handler for the settings password dialog.

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{PasswordChangeForm, RegistrationPolicy};
use crate::domain::foundation::UserId;
use crate::ports::AuthProvider;

use super::AccountError;

/// Command to change the signed-in user's password.
#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub user_id: UserId,
    pub form: PasswordChangeForm,
}

/// Handler for password changes.
pub struct ChangePasswordHandler {
    auth: Arc<dyn AuthProvider>,
    policy: RegistrationPolicy,
}

impl ChangePasswordHandler {
    pub fn new(auth: Arc<dyn AuthProvider>, policy: RegistrationPolicy) -> Self {
        Self { auth, policy }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), AccountError> {
        cmd.form.validate(&self.policy)?;

        self.auth
            .change_password(
                &cmd.user_id,
                &cmd.form.current_password,
                &cmd.form.new_password,
            )
            .await?;

        info!(user_id = %cmd.user_id, "password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryAuthProvider;
    use crate::domain::foundation::{AuthError, ValidationError};
    use secrecy::SecretString;

    async fn setup() -> (Arc<InMemoryAuthProvider>, UserId) {
        let auth = Arc::new(InMemoryAuthProvider::new());
        let user = auth
            .sign_up(
                "ana@siswa.ukm.edu.my",
                &SecretString::new("hunter22".to_string()),
            )
            .await
            .unwrap();
        (auth, user.id)
    }

    #[tokio::test]
    async fn correct_current_password_changes_it() {
        let (auth, user_id) = setup().await;
        let handler = ChangePasswordHandler::new(auth.clone(), RegistrationPolicy::default());

        handler
            .handle(ChangePasswordCommand {
                user_id,
                form: PasswordChangeForm::new("hunter22", "newpass1", "newpass1"),
            })
            .await
            .unwrap();

        assert!(auth
            .sign_in(
                "ana@siswa.ukm.edu.my",
                &SecretString::new("newpass1".to_string())
            )
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn short_new_password_is_rejected_locally() {
        let (auth, user_id) = setup().await;
        let handler = ChangePasswordHandler::new(auth, RegistrationPolicy::default());

        let err = handler
            .handle(ChangePasswordCommand {
                user_id,
                form: PasswordChangeForm::new("hunter22", "abc", "abc"),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AccountError::Validation(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[tokio::test]
    async fn wrong_current_password_is_reported() {
        let (auth, user_id) = setup().await;
        let handler = ChangePasswordHandler::new(auth, RegistrationPolicy::default());

        let err = handler
            .handle(ChangePasswordCommand {
                user_id,
                form: PasswordChangeForm::new("not-it", "newpass1", "newpass1"),
            })
            .await
            .unwrap_err();

        assert_eq!(err, AccountError::Auth(AuthError::WrongPassword));
    }
}
