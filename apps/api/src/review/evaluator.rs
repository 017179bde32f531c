//! Evaluation Client — pluggable, trait-based boundary to the remote model.
//!
//! `AppState` holds an `Arc<dyn Evaluator>`; production uses `GeminiEvaluator`,
//! tests swap in fakes without touching the handler.

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::{LlmClient, LlmError};
use crate::models::review::{EvaluationPrompt, EvaluationResult};

#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The call itself failed: network, auth, rate limit, server error.
    #[error("Remote evaluation failed: {0}")]
    RemoteEvaluationFailure(#[source] LlmError),

    /// The call succeeded but produced nothing usable.
    #[error("Invalid remote response: {0}")]
    InvalidRemoteResponse(String),
}

#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Consumes the prompt; exactly one evaluation per request.
    async fn evaluate(&self, prompt: EvaluationPrompt) -> Result<EvaluationResult, EvaluationError>;
}

/// Evaluates prompts with Gemini through the shared `LlmClient`. No caching:
/// identical inputs are evaluated afresh.
pub struct GeminiEvaluator(pub LlmClient);

#[async_trait]
impl Evaluator for GeminiEvaluator {
    async fn evaluate(&self, prompt: EvaluationPrompt) -> Result<EvaluationResult, EvaluationError> {
        let text = self
            .0
            .generate_text(prompt.user(), prompt.system())
            .await
            .map_err(|e| match e {
                LlmError::EmptyContent => {
                    EvaluationError::InvalidRemoteResponse("model returned no text".to_string())
                }
                LlmError::Blocked(reason) => {
                    EvaluationError::InvalidRemoteResponse(format!("prompt blocked ({reason})"))
                }
                LlmError::Parse(e) => {
                    EvaluationError::InvalidRemoteResponse(format!("unreadable response body: {e}"))
                }
                other => EvaluationError::RemoteEvaluationFailure(other),
            })?;

        EvaluationResult::new(text)
            .ok_or_else(|| EvaluationError::InvalidRemoteResponse("blank review".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::prompts::build_prompt;
    use crate::models::review::ExtractedText;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn evaluator_for(server: &MockServer) -> GeminiEvaluator {
        GeminiEvaluator(
            LlmClient::new(
                "test-key".to_string(),
                server.base_url(),
                Duration::from_secs(5),
                1,
            )
            .unwrap(),
        )
    }

    fn prompt() -> EvaluationPrompt {
        build_prompt(&ExtractedText::new("Rust, Tokio"), "Backend engineer, Rust").unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_review_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path_contains(":generateContent");
                then.status(200).json_body(json!({
                    "candidates": [{ "content": { "parts": [{ "text": "### 🔍 Matching Skills\n- Rust" }] } }]
                }));
            })
            .await;

        let result = evaluator_for(&server).evaluate(prompt()).await.unwrap();
        assert_eq!(result.into_inner(), "### 🔍 Matching Skills\n- Rust");
    }

    #[tokio::test]
    async fn test_remote_error_is_remote_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(500).body("boom");
            })
            .await;

        let err = evaluator_for(&server).evaluate(prompt()).await.unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::RemoteEvaluationFailure(LlmError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_text_is_invalid_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
                }));
            })
            .await;

        let err = evaluator_for(&server).evaluate(prompt()).await.unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidRemoteResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_remote_failure() {
        let evaluator = GeminiEvaluator(
            LlmClient::new(
                "test-key".to_string(),
                "http://127.0.0.1:9".to_string(),
                Duration::from_secs(2),
                1,
            )
            .unwrap(),
        );

        let err = evaluator.evaluate(prompt()).await.unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::RemoteEvaluationFailure(LlmError::Http(_))
        ));
    }
}
