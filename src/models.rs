//! Data models and structures
//!
//! Defines the handler's request/response envelopes and the runtime
//! configuration loaded from the environment.

use crate::Error;
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// One inbound invocation: the HTTP verb and the raw body, if any.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: String,
    pub body: Option<String>,
}

impl IncomingRequest {
    pub fn new(method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            method: method.into(),
            body,
        }
    }

    pub fn post(body: impl Into<String>) -> Self {
        Self::new("POST", Some(body.into()))
    }
}

/// Status code plus JSON body returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl OutgoingResponse {
    pub fn answer(answer: String) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({ "answer": answer }),
        }
    }
}

impl From<Error> for OutgoingResponse {
    fn from(err: Error) -> Self {
        Self {
            status: err.status(),
            body: err.to_body(),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub upstream_timeout: Option<Duration>,
    pub bind_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            upstream_timeout: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8888)),
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    ///
    /// A missing `GEMINI_API_KEY` is not a startup error; requests report it instead.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let defaults = Self::default();

        let upstream_timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                Error::Generic(format!("Invalid GEMINI_TIMEOUT_SECS '{}'", raw))
            })?)),
            None => None,
        };

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::Generic(format!("Invalid BIND_ADDR '{}'", raw)))?,
            None => defaults.bind_addr,
        };

        Ok(Self {
            gemini_api_key: lookup("GEMINI_API_KEY"),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: lookup("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            upstream_timeout,
            bind_addr,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(api_key.into());
        self
    }

    /// The API key, treating an empty value as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref().filter(|key| !key.is_empty())
    }
}
