//! Application layer - Handlers, the profile repository and controllers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod context;
pub mod handlers;
pub mod profile;

pub use context::AppContext;
pub use handlers::{
    AccountError, ChangePasswordCommand, ChangePasswordHandler, RegisterAccountHandler,
    RegisterAccountResult, SignInHandler,
};
pub use profile::{LoadPhase, ProfileController, ProfileRepository, ProfileStream, ProfileViewState};
