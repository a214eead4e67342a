//! The ask endpoint: validate, forward to the tutor service, translate.

use crate::ai::{GeminiTutorClient, TutorService};
use crate::models::{Config, IncomingRequest, OutgoingResponse};
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Handles one invocation at a time; cheap to clone and share across tasks.
#[derive(Clone)]
pub struct AskHandler {
    config: Arc<Config>,
    service: Arc<dyn TutorService>,
}

impl AskHandler {
    pub fn new(config: Config, service: Arc<dyn TutorService>) -> Self {
        Self {
            config: Arc::new(config),
            service,
        }
    }

    /// Build a handler talking to Gemini as described by `config`.
    pub fn from_config(config: Config) -> Self {
        let service = Arc::new(GeminiTutorClient::from_config(&config));
        Self::new(config, service)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Always produces a response; every failure is mapped to a status and body here.
    pub async fn handle(&self, request: IncomingRequest) -> OutgoingResponse {
        match self.try_handle(request).await {
            Ok(answer) => OutgoingResponse::answer(answer),
            Err(err) => {
                warn!(status = err.status().as_u16(), "Rejecting ask request: {}", err);
                OutgoingResponse::from(err)
            }
        }
    }

    async fn try_handle(&self, request: IncomingRequest) -> Result<String> {
        if request.method != "POST" {
            return Err(Error::MethodNotAllowed);
        }

        let question = parse_question(request.body.as_deref())?;
        let api_key = self.config.api_key().ok_or(Error::MissingApiKey)?;

        self.service.ask(api_key, &question).await
    }
}

/// Pull the question out of the raw request body.
///
/// An absent or empty body reads as `{}`. Falsy questions (missing, `null`,
/// `false`, `0`, `""`) are rejected; other values are embedded with the same
/// text a JavaScript template literal would produce.
fn parse_question(body: Option<&str>) -> Result<String> {
    let raw = body.filter(|b| !b.is_empty()).unwrap_or("{}");
    let parsed: Value = serde_json::from_str(raw)?;

    let question = match parsed {
        Value::Null => {
            return Err(Error::InvalidBody(
                "expected a JSON object, found null".to_string(),
            ))
        }
        Value::Object(mut fields) => fields.remove("question").unwrap_or(Value::Null),
        _ => Value::Null,
    };

    match question {
        Value::String(text) if !text.is_empty() => Ok(text),
        Value::Number(ref n) if n.as_f64() == Some(0.0) => Err(Error::MissingQuestion),
        value @ (Value::Number(_) | Value::Bool(true) | Value::Array(_) | Value::Object(_)) => {
            Ok(display_value(&value))
        }
        _ => Err(Error::MissingQuestion),
    }
}

/// Stringify a JSON value the way JavaScript's `String(value)` does.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| n.to_string(), display_number),
        Value::String(text) => text.clone(),
        // Array elements that are null render as empty strings.
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// JavaScript number formatting: integral values drop the fraction, and
/// exponent notation kicks in below 1e-6 and from 1e21 up.
fn display_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        n.to_string()
    }
}
