// src/llm.rs

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use thiserror::Error;

use crate::gemini::GeminiClient;

/// One prior turn in the provider's vocabulary ("user" / "model").
#[derive(Debug, Clone)]
pub struct AssistantTurn {
    pub role: &'static str,
    pub text: String,
}

/// A web source the provider consulted while grounding its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateReply {
    pub text: String,
    pub links: Vec<GroundingLink>,
}

/// Failures at the AI boundary. Variants stay cloneable so a completed turn
/// can travel through the app event channel.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LlmError {
    #[error("no API credential is configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for LlmError {
    fn from(error: reqwest::Error) -> Self {
        LlmError::Http(error.to_string())
    }
}

/// Strategy over assistant backends: the hosted Gemini service in the real
/// binary, a scripted mock everywhere tests need determinism.
#[derive(Debug)]
pub enum AssistantStrategy {
    Gemini(GeminiClient),
    Mock(MockAssistant),
}

impl AssistantStrategy {
    pub async fn generate(
        &self,
        turns: &[AssistantTurn],
        instruction: &str,
    ) -> Result<GenerateReply, LlmError> {
        match self {
            AssistantStrategy::Gemini(client) => client.generate(turns, instruction).await,
            AssistantStrategy::Mock(mock) => mock.generate(turns, instruction),
        }
    }

    pub fn model_info(&self) -> String {
        match self {
            AssistantStrategy::Gemini(client) => client.model_info(),
            AssistantStrategy::Mock(_) => "Mock assistant".to_string(),
        }
    }
}

/// Scripted stand-in for the hosted service. Pops queued outcomes in order
/// and falls back to a canned acknowledgement when the script runs dry.
#[derive(Debug, Default)]
pub struct MockAssistant {
    replies: Mutex<VecDeque<Result<GenerateReply, LlmError>>>,
}

impl MockAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<Result<GenerateReply, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }

    pub fn generate(
        &self,
        turns: &[AssistantTurn],
        _instruction: &str,
    ) -> Result<GenerateReply, LlmError> {
        if let Some(next) = self.replies.lock().unwrap().pop_front() {
            return next;
        }

        let prompt = turns.last().map(|t| t.text.as_str()).unwrap_or("");
        Ok(GenerateReply {
            text: format!(
                "I understand you're asking about '{}'. The live Stallion assistant needs a configured API credential.",
                prompt
            ),
            links: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(text: &str) -> AssistantTurn {
        AssistantTurn {
            role: "user",
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn mock_pops_scripted_replies_in_order() {
        let strategy = AssistantStrategy::Mock(MockAssistant::with_replies(vec![
            Ok(GenerateReply {
                text: "first".to_string(),
                links: Vec::new(),
            }),
            Err(LlmError::MissingCredential),
        ]));

        let first = strategy.generate(&[turn("hi")], "").await.unwrap();
        assert_eq!(first.text, "first");

        let second = strategy.generate(&[turn("hi")], "").await;
        assert_eq!(second, Err(LlmError::MissingCredential));
    }

    #[tokio::test]
    async fn exhausted_mock_echoes_the_prompt() {
        let strategy = AssistantStrategy::Mock(MockAssistant::new());
        let reply = strategy.generate(&[turn("enrollment")], "").await.unwrap();
        assert!(reply.text.contains("enrollment"));
        assert!(reply.links.is_empty());
    }
}
