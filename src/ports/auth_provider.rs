//! Auth provider port - the external email/password auth service.
//!
//! # Example
//!
//! ```ignore
//! let user = auth_provider.sign_in("me@siswa.ukm.edu.my", &password).await?;
//! controller.start(user.id);
//! ```

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};

/// Email/password account operations.
///
/// # Contract
///
/// Implementations must:
/// - Return a stable user id for the same account on every sign-in
/// - Map provider failures onto the `AuthError` categories
/// - Return `AuthError::Network` for transient transport errors
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in an existing account.
    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthenticatedUser, AuthError>;

    /// Creates an account and signs it in.
    async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthenticatedUser, AuthError>;

    /// Replaces the password after re-checking the current one.
    async fn change_password(
        &self,
        user_id: &UserId,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), AuthError>;
}
