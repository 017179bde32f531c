//! Terminal client for the resume analyzer: uploads a résumé PDF with a job
//! description and prints the formatted review.

mod client;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::client::ReviewClient;
use crate::render::render_markdown;

const MISSING_INPUT_MESSAGE: &str = "Please upload a resume and enter a job description.";
const FALLBACK_MESSAGE: &str = "Error processing resume. Please try again.";

#[derive(Debug, Parser)]
#[command(name = "analyzer-cli", version, about = "Review a resume PDF against a job description")]
struct Cli {
    /// Resume to upload (PDF)
    #[arg(long, short)]
    resume: Option<PathBuf>,

    /// Job description text
    #[arg(long, short = 'j', conflicts_with = "job_file")]
    job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    job_file: Option<PathBuf>,

    /// Base URL of the analyzer API
    #[arg(long, env = "ANALYZER_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[arg(long, default_value_t = 180)]
    timeout_secs: u64,

    /// Print without terminal styling
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let job_description = match resolve_job_description(&cli) {
        Ok(jd) => jd,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let (Some(resume), Some(job_description)) = (cli.resume.as_deref(), job_description) else {
        eprintln!("{MISSING_INPUT_MESSAGE}");
        return ExitCode::FAILURE;
    };

    eprintln!("Analyzing {}...", resume.display());

    match submit(&cli, resume, &job_description).await {
        Ok(review) => {
            let ansi = !cli.plain && std::env::var_os("NO_COLOR").is_none();
            print!("{}", render_markdown(&review, ansi));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error analyzing resume: {e:#}");
            println!("{FALLBACK_MESSAGE}");
            ExitCode::FAILURE
        }
    }
}

/// Inline text wins over `--job-file`; blank text counts as absent.
fn resolve_job_description(cli: &Cli) -> Result<Option<String>> {
    let text = match (&cli.job_description, &cli.job_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(std::fs::read_to_string(path).with_context(|| {
            format!("Could not read job description from {}", path.display())
        })?),
        (None, None) => None,
    };
    Ok(text.filter(|t| !t.trim().is_empty()))
}

async fn submit(cli: &Cli, resume: &Path, job_description: &str) -> Result<String> {
    let bytes = tokio::fs::read(resume)
        .await
        .with_context(|| format!("Could not read {}", resume.display()))?;
    let file_name = resume
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume.pdf");

    let client = ReviewClient::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))?;
    Ok(client.analyze(file_name, bytes, job_description).await?)
}
