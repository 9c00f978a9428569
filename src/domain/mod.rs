//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors, state machine)
//! - `profile` - Student and tutor profile documents
//! - `account` - Sign-in, registration and password change form checks
//! - `navigation` - Screen graph and navigator

pub mod account;
pub mod foundation;
pub mod navigation;
pub mod profile;
