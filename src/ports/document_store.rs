//! DocumentStore port - the remote keyed document database.
//!
//! Documents are flat field maps stored under `collection/id`. The store
//! stamps every accepted write with a server-side update time and can
//! stream changes of a single document to a [`Subscription`].

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::profile::{DocumentFields, Role, SchemaError};

use super::Subscription;

/// Collections this app reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    StudentProfiles,
    TutorProfiles,
    /// Account records written at registration.
    Users,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::StudentProfiles => "studentProfiles",
            Collection::TutorProfiles => "tutorProfiles",
            Collection::Users => "users",
        }
    }

    /// Profile collection for a role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Student => Collection::StudentProfiles,
            Role::Tutor => Collection::TutorProfiles,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Address of one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub collection: Collection,
    pub id: UserId,
}

impl DocumentKey {
    pub fn new(collection: Collection, id: UserId) -> Self {
        Self { collection, id }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// A stored document as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub fields: DocumentFields,

    /// Set by the store on every accepted write.
    pub update_time: Timestamp,
}

/// Failures talking to the document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error(transparent)]
    Decode(#[from] SchemaError),

    #[error("Subscription closed by the store")]
    SubscriptionClosed,
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }
}

/// Keyed read/write/watch access to documents.
///
/// # Contract
///
/// - `set` replaces the whole document; there is no field merge
/// - `watch` yields the current state first (`None` if absent) and then
///   every later change, until the subscription is cancelled or the
///   store reports an error
/// - delivery is at-least-once per document; a `set` and a concurrent
///   external change are not ordered relative to each other
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document once.
    async fn get(&self, key: &DocumentKey) -> Result<Option<Document>, StoreError>;

    /// Creates or fully overwrites a document.
    async fn set(&self, key: &DocumentKey, fields: DocumentFields) -> Result<(), StoreError>;

    /// Opens a live subscription on one document.
    async fn watch(&self, key: &DocumentKey) -> Result<Subscription<Option<Document>>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_match_the_store_layout() {
        assert_eq!(Collection::for_role(Role::Student).name(), "studentProfiles");
        assert_eq!(Collection::for_role(Role::Tutor).name(), "tutorProfiles");
        assert_eq!(Collection::Users.name(), "users");
    }

    #[test]
    fn key_displays_as_path() {
        let key = DocumentKey::new(Collection::TutorProfiles, UserId::new("u1").unwrap());
        assert_eq!(key.to_string(), "tutorProfiles/u1");
    }

    #[test]
    fn schema_errors_convert_into_store_errors() {
        let err: StoreError = SchemaError::Decode {
            role: Role::Tutor,
            reason: "missing field `skills`".to_string(),
        }
        .into();
        assert!(err.to_string().contains("missing field `skills`"));
    }

    #[test]
    fn document_store_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn DocumentStore) {}
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<std::sync::Arc<dyn DocumentStore>>();
    }
}
