use thiserror::Error;
use validator::ValidationErrors;
use serde_json::Error as JsonError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
pub enum SharedError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl From<ValidationErrors> for SharedError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<JsonError> for SharedError {
    fn from(error: JsonError) -> Self {
        Self::Conversion(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SharedError>;
