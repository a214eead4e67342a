//! Error handling and custom error types
//!
//! Every failure in the request path is one of these variants. The handler
//! boundary turns them into a status code and a JSON body, so nothing escapes
//! to the caller as a transport failure.

use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Use POST")]
    MethodNotAllowed,

    #[error("Missing question")]
    MissingQuestion,

    #[error("Missing GEMINI_API_KEY")]
    MissingApiKey,

    #[error("Upstream error")]
    Upstream { detail: String },

    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Generic(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::MissingQuestion => StatusCode::BAD_REQUEST,
            Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Error::MissingApiKey
            | Error::Serialization(_)
            | Error::Http(_)
            | Error::InvalidBody(_)
            | Error::Generic(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing JSON body: `{error}` or, for upstream failures, `{error, detail}`.
    pub fn to_body(&self) -> Value {
        match self {
            Error::Upstream { detail } => json!({ "error": self.to_string(), "detail": detail }),
            _ => {
                let message = self.to_string();
                // Some reqwest/serde errors can render empty; callers always get something.
                if message.is_empty() {
                    json!({ "error": "Internal error" })
                } else {
                    json!({ "error": message })
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
