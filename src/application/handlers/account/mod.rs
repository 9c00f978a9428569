//! Account command handlers.

mod change_password;
mod error;
mod register_account;
mod sign_in;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use error::AccountError;
pub use register_account::{RegisterAccountHandler, RegisterAccountResult};
pub use sign_in::SignInHandler;
