//! In-memory auth service.
//!
//! Implements the `AuthProvider` port without an external service, for
//! tests and the headless host. Passwords are kept as salted SHA-256
//! digests and compared in constant time.
//!
//! # Example
//!
//! ```ignore
//! let auth = InMemoryAuthProvider::new();
//! let user = auth.sign_up("ana@siswa.ukm.edu.my", &secret("hunter22")).await?;
//! assert_eq!(auth.sign_in("ana@siswa.ukm.edu.my", &secret("hunter22")).await?.id, user.id);
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::AuthProvider;

/// The auth service's own password floor, separate from the form check.
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    user: AuthenticatedUser,
    password_digest: [u8; 32],
    disabled: bool,
}

/// In-memory auth provider.
///
/// Accounts are keyed by lower-cased email.
#[derive(Debug, Default)]
pub struct InMemoryAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    /// Optional error to return for all calls (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl InMemoryAuthProvider {
    /// Creates a new empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces all calls to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        *self.force_error.get_mut() = Some(error);
        self
    }

    /// Forces or clears an error at runtime.
    pub async fn set_error(&self, error: Option<AuthError>) {
        *self.force_error.write().await = error;
    }

    /// Disables an account; later sign-ins fail with `UserDisabled`.
    pub async fn disable(&self, email: &str) -> bool {
        match self.accounts.write().await.get_mut(&normalize(email)) {
            Some(account) => {
                account.disabled = true;
                true
            }
            None => false,
        }
    }

    /// Returns the number of registered accounts.
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    async fn check_forced_error(&self) -> Result<(), AuthError> {
        match self.force_error.read().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn digest(user_id: &UserId, password: &SecretString) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(password.expose_secret().as_bytes());
    hasher.finalize().into()
}

fn looks_like_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

fn verify(account: &Account, password: &SecretString) -> bool {
    digest(&account.user.id, password)
        .ct_eq(&account.password_digest)
        .into()
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthenticatedUser, AuthError> {
        self.check_forced_error().await?;
        if !looks_like_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&normalize(email))
            .ok_or(AuthError::UserNotFound)?;
        if account.disabled {
            return Err(AuthError::UserDisabled);
        }
        if !verify(account, password) {
            debug!(user_id = %account.user.id, "password mismatch");
            return Err(AuthError::WrongPassword);
        }
        Ok(account.user.clone())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthenticatedUser, AuthError> {
        self.check_forced_error().await?;
        if !looks_like_email(email) {
            return Err(AuthError::InvalidEmail);
        }
        if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }

        let mut accounts = self.accounts.write().await;
        let email_key = normalize(email);
        if accounts.contains_key(&email_key) {
            return Err(AuthError::EmailAlreadyInUse);
        }

        let user = AuthenticatedUser::new(UserId::generate(), email.trim());
        let account = Account {
            password_digest: digest(&user.id, password),
            user: user.clone(),
            disabled: false,
        };
        accounts.insert(email_key, account);
        info!(user_id = %user.id, "account created");
        Ok(user)
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), AuthError> {
        self.check_forced_error().await?;

        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|account| &account.user.id == user_id)
            .ok_or(AuthError::UserNotFound)?;
        if account.disabled {
            return Err(AuthError::UserDisabled);
        }
        if !verify(account, current_password) {
            return Err(AuthError::WrongPassword);
        }
        if new_password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }
        account.password_digest = digest(user_id, new_password);
        info!(%user_id, "password changed");
        Ok(())
    }
}
