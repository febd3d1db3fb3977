//! Request and response models for the items API

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stored item as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub text: String,
}

/// Body of POST /items
#[derive(Debug, Clone, Deserialize)]
pub struct ItemCreate {
    pub text: String,
}

/// Body of PUT /items/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct ItemUpdate {
    pub text: String,
}

/// Validation error for request bodies
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Boundary validation for deserialized request bodies.
///
/// Implemented by every shape accepted through [`crate::extract::ValidatedJson`].
pub trait ValidateBody {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl ValidateBody for ItemCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }
        Ok(())
    }
}

impl ValidateBody for ItemUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }
        Ok(())
    }
}
