//! Application handlers.
//!
//! Command handlers that orchestrate domain checks and port calls.

pub mod account;

pub use account::{
    AccountError, ChangePasswordCommand, ChangePasswordHandler, RegisterAccountHandler,
    RegisterAccountResult, SignInHandler,
};
