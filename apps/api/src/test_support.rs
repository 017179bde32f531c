//! Shared fixtures for unit tests: a tiny PDF writer, multipart request
//! builder, a recording fake evaluator and a log capture sink.

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request};
use tracing_subscriber::fmt::MakeWriter;

use crate::config::Config;
use crate::llm_client::LlmError;
use crate::models::review::{EvaluationPrompt, EvaluationResult};
use crate::review::evaluator::{EvaluationError, Evaluator};
use crate::state::AppState;

/// Builds a one-page PDF (Helvetica, one text line) with a correct xref table.
pub fn single_page_pdf(text: &str) -> Vec<u8> {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)");
    let content = format!("BT /F1 12 Tf 72 720 Td ({escaped}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}

pub enum FormPart<'a> {
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

const BOUNDARY: &str = "----analyzer-test-boundary";

/// `POST uri` with a multipart/form-data body made of `parts`.
pub fn multipart_request(uri: &str, parts: &[FormPart<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            FormPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

enum FakeOutcome {
    Review(String),
    RemoteFailure,
}

/// Records every prompt it receives and answers with a canned outcome.
pub struct FakeEvaluator {
    outcome: FakeOutcome,
    calls: Mutex<Vec<EvaluationPrompt>>,
}

impl FakeEvaluator {
    pub fn returning(review: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: FakeOutcome::Review(review.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: FakeOutcome::RemoteFailure,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<EvaluationPrompt> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Evaluator for FakeEvaluator {
    async fn evaluate(&self, prompt: EvaluationPrompt) -> Result<EvaluationResult, EvaluationError> {
        self.calls.lock().unwrap().push(prompt);
        match &self.outcome {
            FakeOutcome::Review(text) => EvaluationResult::new(text.clone()).ok_or_else(|| {
                EvaluationError::InvalidRemoteResponse("blank review".to_string())
            }),
            FakeOutcome::RemoteFailure => Err(EvaluationError::RemoteEvaluationFailure(
                LlmError::Api {
                    status: 503,
                    message: "model overloaded".to_string(),
                },
            )),
        }
    }
}

pub fn test_config(max_upload_bytes: usize) -> Config {
    let mut config = Config::from_lookup(|key| match key {
        "GOOGLE_GEMINI_KEY" => Some("test-key".to_string()),
        _ => None,
    })
    .unwrap();
    config.max_upload_bytes = max_upload_bytes;
    config
}

pub fn test_state(evaluator: Arc<dyn Evaluator>) -> AppState {
    AppState {
        evaluator,
        config: test_config(10 * 1024 * 1024),
    }
}

/// In-memory log sink for the `fmt` subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(self.0.clone())
    }
}

/// Installs a capturing subscriber for the current thread until the guard drops.
/// Pair with the default current-thread `#[tokio::test]` runtime.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
