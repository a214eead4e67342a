use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Lightweight Gemini REST client.
///
/// The API key is supplied per call and appended verbatim as the `key` query
/// parameter, without percent-encoding.
pub struct GeminiHttpClient {
    client: Client,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-1.5-flash`);
    /// a `models/...` prefix is stripped.
    pub fn new(model: String, base_url: String, timeout: Option<Duration>) -> Self {
        Self::new_with_client(model, base_url, timeout, Client::new())
    }

    pub fn new_with_client(
        model: String,
        base_url: String,
        timeout: Option<Duration>,
        client: Client,
    ) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();
        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            client,
            model,
            base_url,
            timeout,
        }
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Calls Gemini's `generateContent` endpoint.
    ///
    /// A non-2xx status yields [`Error::Upstream`] carrying the raw body text.
    pub async fn generate_content<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        api_key: &str,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        tracing::debug!(model = %self.model, "Sending generateContent request to Gemini");

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            // reqwest includes the URL (and so the key) in its Display output.
            let e = e.without_url();
            tracing::error!("Failed to send request to Gemini: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.map_err(|e| e.without_url())?;
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::Upstream { detail: error_text });
        }

        let body = response.text().await.map_err(|e| e.without_url())?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::Serialization(e)
        })
    }
}
