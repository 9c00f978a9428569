//! SignInHandler - Command handler for signing in.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::account::LoginForm;
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::AuthProvider;

use super::AccountError;

/// Handler for the login screen.
pub struct SignInHandler {
    auth: Arc<dyn AuthProvider>,
}

impl SignInHandler {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }

    pub async fn handle(&self, form: LoginForm) -> Result<AuthenticatedUser, AccountError> {
        // 1. Reject blank fields locally
        form.validate()?;

        // 2. Ask the auth service
        let user = self
            .auth
            .sign_in(form.email.trim(), &form.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "sign-in rejected");
                e
            })?;

        info!(user_id = %user.id, "signed in");
        Ok(user)
    }
}
