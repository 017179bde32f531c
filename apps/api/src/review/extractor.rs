//! Document Text Extractor — turns an in-memory PDF into plain text.

use bytes::Bytes;
use thiserror::Error;

use crate::models::review::ExtractedText;

const PDF_SIGNATURE: &[u8] = b"%PDF-";
/// Readers tolerate leading garbage before the header; so do we, within this window.
const SIGNATURE_WINDOW: usize = 1024;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Could not parse PDF: {0}")]
    ParseFailure(String),
}

/// Extracts the text of every page. Pure function of its input.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    if !has_pdf_signature(bytes) {
        return Err(ExtractError::ParseFailure(
            "missing %PDF- header".to_string(),
        ));
    }

    pdf_extract::extract_text_from_mem(bytes)
        .map(ExtractedText::new)
        .map_err(|e| ExtractError::ParseFailure(e.to_string()))
}

/// Runs `extract_text` on the blocking pool. A panic inside the PDF library
/// surfaces as a `ParseFailure` instead of tearing down the request task.
pub async fn extract_text_blocking(bytes: Bytes) -> Result<ExtractedText, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| ExtractError::ParseFailure(format!("PDF extraction aborted: {e}")))?
}

fn has_pdf_signature(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(SIGNATURE_WINDOW)];
    window
        .windows(PDF_SIGNATURE.len())
        .any(|w| w == PDF_SIGNATURE)
}
