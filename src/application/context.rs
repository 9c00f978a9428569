//! AppContext - the composition root shared by every screen.

use std::sync::Arc;

use crate::adapters::{InMemoryAuthProvider, InMemoryDocumentStore};
use crate::config::AppConfig;
use crate::domain::account::RegistrationPolicy;
use crate::domain::profile::{StudentProfile, TutorProfile};
use crate::ports::{AuthProvider, DocumentStore};

use super::handlers::{ChangePasswordHandler, RegisterAccountHandler, SignInHandler};
use super::profile::{ProfileController, ProfileRepository};

/// Ports plus the rules the handlers need.
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<dyn DocumentStore>,
    pub policy: RegistrationPolicy,
}

impl AppContext {
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

    /// Context backed by the in-memory adapters.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(InMemoryAuthProvider::new()),
            Arc::new(InMemoryDocumentStore::with_options(
                config.store.in_memory_options(),
            )),
            config.auth.registration_policy(),
        )
    }

    /// Create handlers on demand from the shared context.
    pub fn sign_in_handler(&self) -> SignInHandler {
        SignInHandler::new(self.auth.clone())
    }

    pub fn register_account_handler(&self) -> RegisterAccountHandler {
        RegisterAccountHandler::new(self.auth.clone(), self.store.clone(), self.policy.clone())
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.auth.clone(), self.policy.clone())
    }

    pub fn student_profiles(&self) -> ProfileRepository<StudentProfile> {
        ProfileRepository::new(self.store.clone())
    }

    pub fn tutor_profiles(&self) -> ProfileRepository<TutorProfile> {
        ProfileRepository::new(self.store.clone())
    }

    /// Spawns the controller behind the student profile screen.
    pub fn student_profile_controller(&self) -> ProfileController<StudentProfile> {
        ProfileController::spawn(self.student_profiles())
    }

    /// Spawns the controller behind the tutor profile screen.
    pub fn tutor_profile_controller(&self) -> ProfileController<TutorProfile> {
        ProfileController::spawn(self.tutor_profiles())
    }
}
