//! Per-request values of the review pipeline. Nothing here outlives a request.

use bytes::Bytes;
use serde::Serialize;

/// The uploaded résumé, buffered in memory for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Plain text pulled out of an `UploadedDocument`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The composed instruction pair sent to the model. Immutable once built and
/// consumed by value by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationPrompt {
    system: &'static str,
    user: String,
}

impl EvaluationPrompt {
    pub(crate) fn new(system: &'static str, user: String) -> Self {
        Self { system, user }
    }

    pub fn system(&self) -> &'static str {
        self.system
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

/// Model output. Loosely structured free text; only guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult(String);

impl EvaluationResult {
    /// Returns `None` for blank output so an empty review can never be reported as success.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Body of a successful `POST /ai/analyze-resume`.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review: String,
}
