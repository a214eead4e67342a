//! Ask-Gemini: a physics-tutor question endpoint
//!
//! Accepts `{"question": ...}` over HTTP POST, forwards it to Gemini with a
//! fixed tutor prompt, and relays the answer (or a structured error) back.

pub mod ai;
pub mod error;
pub mod handler;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
pub use handler::AskHandler;
pub use models::{Config, IncomingRequest, OutgoingResponse};
