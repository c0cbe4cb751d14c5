use std::collections::BTreeMap;

use crate::database::manager::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(DatabaseError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Storage(other),
        }
    }
}

/// Collects per-field problems so a request reports all of them at once.
#[derive(Debug, Default)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_non_blank(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.0.insert(field.to_string(), "must not be blank".to_string());
        }
        self
    }

    pub fn require_json(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.trim().is_empty() && serde_json::from_str::<serde_json::Value>(value).is_err() {
            self.0.insert(field.to_string(), "must be a valid JSON document".to_string());
        }
        self
    }

    pub fn into_result(self, message: &str) -> Result<(), ServiceError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation {
                message: message.to_string(),
                fields: self.0,
            })
        }
    }
}
