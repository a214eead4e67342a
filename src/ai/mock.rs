use super::TutorService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted reply for [`MockTutorClient`].
#[derive(Debug, Clone)]
pub enum MockReply {
    Answer(String),
    Upstream(String),
    Fault(String),
}

pub struct MockTutorClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockTutorClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Answer(answer.into()));
        self
    }

    pub fn with_upstream_error(self, detail: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Upstream(detail.into()));
        self
    }

    pub fn with_fault(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Fault(message.into()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(api_key, question)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockTutorClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TutorService for MockTutorClient {
    async fn ask(&self, api_key: &str, question: &str) -> Result<String> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((api_key.to_string(), question.to_string()));
            calls.len()
        };

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Default mock response
            return Ok(format!("Mock answer to: {}", question));
        }

        match &replies[(count - 1) % replies.len()] {
            MockReply::Answer(answer) => Ok(answer.clone()),
            MockReply::Upstream(detail) => Err(Error::Upstream {
                detail: detail.clone(),
            }),
            MockReply::Fault(message) => Err(Error::Generic(message.clone())),
        }
    }
}
