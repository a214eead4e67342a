use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, TextPart,
};
use crate::ai::TutorService;
use crate::models::Config;
use crate::{prompts, Result};
use async_trait::async_trait;

pub const TEMPERATURE: f64 = 0.4;
pub const NO_ANSWER: &str = "No answer.";

/// Physics-tutor question answering backed by Gemini `generateContent`.
pub struct GeminiTutorClient {
    http: GeminiHttpClient,
}

impl GeminiTutorClient {
    pub fn new(model: String, base_url: String) -> Self {
        Self::new_with_client(model, base_url, reqwest::Client::new())
    }

    pub fn new_with_client(model: String, base_url: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(model, base_url, None, client),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            http: GeminiHttpClient::new(
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
                config.upstream_timeout,
            ),
        }
    }

    pub fn build_request(question: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![TextPart {
                    text: prompts::render(prompts::TUTOR_USER, &[("question", question)]),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        }
    }
}

/// First candidate's parts joined by newlines, or [`NO_ANSWER`] when any level
/// is missing or the joined text is empty.
pub fn extract_answer(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.as_ref())
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.as_ref())
        .map(|parts| {
            parts
                .iter()
                .map(|part| part.text.as_deref().unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|answer| !answer.is_empty())
        .unwrap_or_else(|| NO_ANSWER.to_string())
}

#[async_trait]
impl TutorService for GeminiTutorClient {
    async fn ask(&self, api_key: &str, question: &str) -> Result<String> {
        let request = Self::build_request(question);
        let response: Option<GenerateContentResponse> =
            self.http.generate_content(api_key, &request).await?;
        Ok(response.as_ref().map_or_else(|| NO_ANSWER.to_string(), extract_answer))
    }
}
