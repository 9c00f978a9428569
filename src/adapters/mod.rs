//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - auth service implementations
//! - `storage` - document store implementations

pub mod auth;
pub mod storage;

pub use auth::InMemoryAuthProvider;
pub use storage::{InMemoryDocumentStore, InMemoryStoreOptions};
