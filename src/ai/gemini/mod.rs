pub mod client;
pub mod tutor;
pub mod types;

pub use client::GeminiHttpClient;
pub use tutor::{extract_answer, GeminiTutorClient, NO_ANSWER};
