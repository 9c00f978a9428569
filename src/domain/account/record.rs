//! Account record written to `users/{userId}` at registration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::UserId;
use crate::domain::profile::DocumentFields;

/// Who registered, with which matric number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub email: String,
    pub matric_number: String,
    pub user_id: String,
}

impl AccountRecord {
    pub fn new(user_id: &UserId, email: impl Into<String>, matric_number: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            matric_number: matric_number.into(),
            user_id: user_id.as_str().to_string(),
        }
    }

    pub fn to_fields(&self) -> DocumentFields {
        let mut fields = DocumentFields::new();
        fields.insert("email".to_string(), Value::String(self.email.clone()));
        fields.insert(
            "matricNumber".to_string(),
            Value::String(self.matric_number.clone()),
        );
        fields.insert("userId".to_string(), Value::String(self.user_id.clone()));
        fields
    }

    pub fn from_fields(fields: &DocumentFields) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(fields.clone()))
    }
}
