//! Authentication adapters.
//!
//! Implementations of the `AuthProvider` port:
//!
//! - `in_memory` - self-contained auth service for tests and local runs

mod in_memory;

pub use in_memory::InMemoryAuthProvider;
