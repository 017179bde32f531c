use std::time::Duration;

use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const ANALYZE_PATH: &str = "/ai/analyze-resume";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Server { status: StatusCode, message: String },

    #[error("Response had no review")]
    MissingReview,
}

#[derive(Debug, Deserialize)]
struct ReviewBody {
    review: Option<String>,
    error: Option<String>,
}

/// Thin client for the analyzer HTTP API.
pub struct ReviewClient {
    http: Client,
    base_url: String,
}

impl ReviewClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Uploads the résumé and job description; returns the markdown review.
    pub async fn analyze(
        &self,
        file_name: &str,
        resume: Vec<u8>,
        job_description: &str,
    ) -> Result<String, ClientError> {
        let resume_part = multipart::Part::bytes(resume)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new()
            .part("resume", resume_part)
            .text("jobDescription", job_description.to_string());

        let response = self
            .http
            .post(format!("{}{ANALYZE_PATH}", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body: ReviewBody = response.json().await?;
        debug!("analyzer responded with {status}");

        if !status.is_success() {
            return Err(ClientError::Server {
                status,
                message: body.error.unwrap_or_default(),
            });
        }

        body.review
            .filter(|r| !r.trim().is_empty())
            .ok_or(ClientError::MissingReview)
    }
}
