//! RegisterAccountHandler - Command handler for creating an account.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::account::{AccountRecord, RegistrationForm, RegistrationPolicy};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{AuthProvider, Collection, DocumentKey, DocumentStore};

use super::AccountError;

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterAccountResult {
    pub user: AuthenticatedUser,
    pub record: AccountRecord,
}

/// Handler for the registration screen.
pub struct RegisterAccountHandler {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    policy: RegistrationPolicy,
}

impl RegisterAccountHandler {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
        policy: RegistrationPolicy,
    ) -> Self {
        Self {
            auth,
            store,
            policy,
        }
    }

    pub async fn handle(&self, form: RegistrationForm) -> Result<RegisterAccountResult, AccountError> {
        // 1. Validate locally
        form.validate(&self.policy)?;

        // 2. Create the account
        let email = form.email.trim();
        let user = self.auth.sign_up(email, &form.password).await.map_err(|e| {
            warn!(error = %e, "sign-up rejected");
            e
        })?;

        // 3. Record who registered. The account already exists if this fails.
        let record = AccountRecord::new(&user.id, email, form.matric_number.trim());
        let key = DocumentKey::new(Collection::Users, user.id.clone());
        self.store.set(&key, record.to_fields()).await.map_err(|e| {
            warn!(user_id = %user.id, error = %e, "account record not written");
            e
        })?;

        info!(user_id = %user.id, "account registered");
        Ok(RegisterAccountResult { user, record })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryAuthProvider, InMemoryDocumentStore};
    use crate::domain::foundation::{AuthError, ValidationError};
    use crate::ports::StoreError;

    struct Fixture {
        auth: Arc<InMemoryAuthProvider>,
        store: Arc<InMemoryDocumentStore>,
        handler: RegisterAccountHandler,
    }

    fn fixture() -> Fixture {
        let auth = Arc::new(InMemoryAuthProvider::new());
        let store = Arc::new(InMemoryDocumentStore::new());
        let handler = RegisterAccountHandler::new(
            auth.clone(),
            store.clone(),
            RegistrationPolicy::default(),
        );
        Fixture {
            auth,
            store,
            handler,
        }
    }

    fn form(email: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm::new(email, "A123456", password, confirm)
    }

    #[tokio::test]
    async fn registration_writes_the_account_record() {
        let f = fixture();

        let result = f
            .handler
            .handle(form("student@siswa.ukm.edu.my", "hunter22", "hunter22"))
            .await
            .unwrap();

        let key = DocumentKey::new(Collection::Users, result.user.id.clone());
        let stored = f.store.get(&key).await.unwrap().unwrap();
        let record = AccountRecord::from_fields(&stored.fields).unwrap();
        assert_eq!(record.email, "student@siswa.ukm.edu.my");
        assert_eq!(record.matric_number, "A123456");
        assert_eq!(record.user_id, result.user.id.as_str());
    }

    #[tokio::test]
    async fn foreign_domain_is_rejected_before_sign_up() {
        let f = fixture();

        let err = f
            .handler
            .handle(form("student@gmail.com", "hunter22", "hunter22"))
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message(),
            "Email must end with @siswa.ukm.edu.my"
        );
        assert_eq!(f.auth.account_count().await, 0);
    }

    #[tokio::test]
    async fn mismatched_confirmation_is_rejected() {
        let f = fixture();

        let err = f
            .handler
            .handle(form("student@siswa.ukm.edu.my", "hunter22", "hunter23"))
            .await
            .unwrap_err();

        assert_eq!(err, AccountError::Validation(ValidationError::PasswordMismatch));
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_auth_message() {
        let f = fixture();
        f.handler
            .handle(form("student@siswa.ukm.edu.my", "hunter22", "hunter22"))
            .await
            .unwrap();

        let err = f
            .handler
            .handle(form("student@siswa.ukm.edu.my", "hunter22", "hunter22"))
            .await
            .unwrap_err();

        assert_eq!(err, AccountError::Auth(AuthError::EmailAlreadyInUse));
        assert_eq!(err.user_message(), "Email is already registered");
    }

    #[tokio::test]
    async fn store_failure_is_reported_after_sign_up() {
        let f = fixture();
        f.store.go_offline(StoreError::unavailable("no network")).await;

        let err = f
            .handler
            .handle(form("student@siswa.ukm.edu.my", "hunter22", "hunter22"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::Store(_)));
        assert_eq!(f.auth.account_count().await, 1);
    }
}
