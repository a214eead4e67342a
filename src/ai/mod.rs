//! AI service integration for answering questions
//!
//! Provides the Gemini-backed physics tutor and a scripted mock for tests.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiTutorClient;
pub use mock::MockTutorClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TutorService: Send + Sync {
    /// Answer `question`, authenticating upstream with `api_key`.
    async fn ask(&self, api_key: &str, question: &str) -> Result<String>;
}
