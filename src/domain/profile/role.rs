//! The two account roles and the profile contract they share.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::UserId;

use super::document::{self, DocumentFields, SchemaError};

/// Which side of the marketplace a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Tutor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Tutor => write!(f, "tutor"),
        }
    }
}

/// A profile variant that can be stored as one document per user.
///
/// The document is keyed by user id inside the role's collection, so a
/// user has at most one profile per role.
pub trait RoleProfile:
    Clone + Default + fmt::Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Role this profile variant belongs to.
    const ROLE: Role;

    /// The profile a user has before anything was saved.
    fn empty(user_id: &UserId) -> Self;

    /// Owner id recorded inside the document.
    fn user_id(&self) -> &str;

    /// Rewrites the owner id.
    fn set_user_id(&mut self, user_id: &UserId);

    /// Encodes the full profile into document fields.
    fn to_fields(&self) -> Result<DocumentFields, SchemaError> {
        document::encode(Self::ROLE, self)
    }

    /// Decodes a document into a fully populated profile.
    ///
    /// Missing or mistyped fields are an error, never a silent default.
    fn from_fields(fields: &DocumentFields) -> Result<Self, SchemaError> {
        document::decode(Self::ROLE, fields)
    }
}
