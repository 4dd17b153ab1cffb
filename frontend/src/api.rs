pub mod matches;
pub mod utils;

use crate::config::Config;
use shared::{ErrorResponse, SharedError};
use thiserror::Error;

pub fn api_url(path: &str) -> String {
    let base_url = Config::api_base_url();
    if base_url.is_empty() {
        // Use relative URL
        path.to_string()
    } else {
        // Use absolute URL
        format!("{}{}", base_url, path)
    }
}

/// Failure of a call to the admin endpoints
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds a server error from a non-2xx status and its body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match ErrorResponse::from_body(body) {
            Some(error) => error.error,
            None if body.trim().is_empty() => "no details".to_string(),
            None => body.trim().to_string(),
        };
        Self::Server { status, message }
    }
}

impl From<SharedError> for ApiError {
    fn from(error: SharedError) -> Self {
        Self::Decode(error.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(error: gloo_net::Error) -> Self {
        Self::Network(error.to_string())
    }
}
