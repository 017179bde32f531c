//! Axum route handler for the resume review API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::review::{EvaluationResult, ReviewResponse, UploadedDocument};
use crate::review::evaluator::Evaluator;
use crate::review::extractor::extract_text_blocking;
use crate::review::prompts::build_prompt;
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

/// Raw multipart fields, before presence validation.
#[derive(Debug, Default)]
struct ReviewForm {
    resume: Option<UploadedDocument>,
    job_description: Option<String>,
}

impl ReviewForm {
    fn into_parts(self) -> Result<(UploadedDocument, String), AppError> {
        let resume = self
            .resume
            .ok_or_else(|| AppError::InvalidInput("no resume file part".to_string()))?;
        let job_description = self
            .job_description
            // Whitespace-only counts as missing: there is nothing to evaluate against.
            .filter(|jd| !jd.trim().is_empty())
            .ok_or_else(|| AppError::InvalidInput("no job description".to_string()))?;
        Ok((resume, job_description))
    }
}

/// POST /ai/analyze-resume
///
/// Multipart upload: `resume` (PDF file part) and `jobDescription` (text).
/// Returns `{ "review": ... }` on success.
#[tracing::instrument(name = "analyze_resume", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReviewResponse>, AppError> {
    let multipart =
        multipart.map_err(|e| AppError::InvalidInput(format!("not a multipart request: {e}")))?;

    let form = read_form(multipart).await?;

    info!(
        file_name = form.resume.as_ref().map(|d| d.file_name.as_str()),
        content_type = form.resume.as_ref().and_then(|d| d.content_type.as_deref()),
        size_bytes = form.resume.as_ref().map(|d| d.size()),
        job_description_len = form.job_description.as_ref().map(|jd| jd.len()),
        "Incoming resume review request"
    );

    let (document, job_description) = form.into_parts()?;

    let review = analyze(state.evaluator.as_ref(), document, &job_description).await?;

    Ok(Json(ReviewResponse {
        review: review.into_inner(),
    }))
}

/// Extract → prompt → evaluate. Any stage failing ends the request.
pub async fn analyze(
    evaluator: &dyn Evaluator,
    document: UploadedDocument,
    job_description: &str,
) -> Result<EvaluationResult, AppError> {
    let resume_text = extract_text_blocking(document.bytes).await?;
    let prompt = build_prompt(&resume_text, job_description)?;
    let review = evaluator.evaluate(prompt).await?;
    Ok(review)
}

/// Reads every part of the form. Unknown fields are skipped; the first
/// `resume` file part wins; a `resume` part without a filename is not a file.
async fn read_form(mut multipart: Multipart) -> Result<ReviewForm, AppError> {
    let mut form = ReviewForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let Some(file_name) = field.file_name().map(str::to_owned) else {
                    continue;
                };
                if form.resume.is_some() {
                    continue;
                }
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.resume = Some(UploadedDocument {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some(JOB_DESCRIPTION_FIELD) if field.file_name().is_none() => {
                form.job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::InvalidInput(format!("malformed multipart body: {err}"))
    }
}
