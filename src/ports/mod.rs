//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DocumentStore` - remote keyed document database with live watches
//! - `AuthProvider` - email/password auth service
//! - `Subscription` - cancellable single-consumer stream of store changes

mod auth_provider;
mod document_store;
mod subscription;

pub use auth_provider::AuthProvider;
pub use document_store::{Collection, Document, DocumentKey, DocumentStore, StoreError};
pub use subscription::{Subscription, SubscriptionSink};
