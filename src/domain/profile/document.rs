//! Schema-checked conversion between profiles and loosely typed documents.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::Role;

/// Field map of a stored document.
pub type DocumentFields = Map<String, Value>;

/// A profile could not be converted to or from its document form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("cannot encode {role} profile: {reason}")]
    Encode { role: Role, reason: String },

    #[error("malformed {role} profile document: {reason}")]
    Decode { role: Role, reason: String },
}

pub(crate) fn encode<T: Serialize>(role: Role, value: &T) -> Result<DocumentFields, SchemaError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(SchemaError::Encode {
            role,
            reason: format!("expected an object, got {}", other),
        }),
        Err(e) => Err(SchemaError::Encode {
            role,
            reason: e.to_string(),
        }),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(
    role: Role,
    fields: &DocumentFields,
) -> Result<T, SchemaError> {
    serde_json::from_value(Value::Object(fields.clone())).map_err(|e| SchemaError::Decode {
        role,
        reason: e.to_string(),
    })
}
