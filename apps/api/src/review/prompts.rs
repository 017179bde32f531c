// Prompt constants and the prompt builder for resume evaluation.
// The four section headers are read by the frontend renderer; keep them verbatim.

use thiserror::Error;

use crate::models::review::{EvaluationPrompt, ExtractedText};

/// System instruction describing the reviewer role and the expected output.
pub const RESUME_REVIEW_SYSTEM: &str = "\
You are an AI Resume Analyzer with expertise in recruitment and hiring processes.
Your role is to evaluate a candidate's resume based on a given job description.

Key Responsibilities:
• Assess resume content against the job requirements.
• Identify missing or weak skills compared to the job description.
• Suggest improvements for better ATS (Applicant Tracking System) compatibility.
• Highlight key strengths in the resume.
• Provide a detailed evaluation with action points.

Review Guidelines:
1. **Skill Matching**: Compare the candidate's skills with the job requirements.
2. **ATS Optimization**: Check for formatting, keyword optimization, and readability.
3. **Experience Relevance**: Analyze if the candidate's past roles align with the job.
4. **Achievements & Impact**: Ensure that the resume includes measurable outcomes.
5. **Suggestions for Improvement**: Offer actionable recommendations for enhancement.

Output Format:
- 🔍 **Matching Skills**: List the skills from the resume that match the job description.
- ⚠️ **Missing or Weak Skills**: Identify skills that are required but not present or underrepresented.
- 📄 **Resume Optimization**: Provide ATS-specific feedback for better keyword usage.
- ✅ **Final Recommendation**: A concise summary with suggested improvements.

Be structured, concise, and provide clear explanations.";

/// Output section headers, in the order the model is asked to produce them.
pub const SECTION_HEADERS: [&str; 4] = [
    "### 🔍 Matching Skills",
    "### ⚠️ Missing or Weak Skills",
    "### 📄 Resume Optimization",
    "### ✅ Final Recommendation",
];

const SECTION_GUIDANCE: [&str; 4] = [
    "- List the skills from the resume that match the job description.",
    "- Identify skills that are required but not present or underrepresented in the resume.",
    "- Provide ATS-specific feedback for better keyword usage, formatting, and readability.",
    "- A concise summary with actionable suggestions for improvement.",
];

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Invalid or missing {0}")]
    InvalidInput(&'static str),
}

/// Composes the evaluation prompt. Same inputs always give the same prompt.
pub fn build_prompt(
    resume_text: &ExtractedText,
    job_description: &str,
) -> Result<EvaluationPrompt, PromptError> {
    if resume_text.as_str().trim().is_empty() {
        return Err(PromptError::InvalidInput("resume text"));
    }
    if job_description.trim().is_empty() {
        return Err(PromptError::InvalidInput("job description"));
    }

    let mut prompt = format!(
        "Job Description:\n{}\n\nCandidate's Resume:\n{}\n\n\
         Please evaluate the resume based on the job description and provide feedback in the following format:\n",
        job_description,
        resume_text.as_str(),
    );
    for (header, guidance) in SECTION_HEADERS.iter().zip(SECTION_GUIDANCE) {
        prompt.push('\n');
        prompt.push_str(header);
        prompt.push('\n');
        prompt.push_str(guidance);
        prompt.push('\n');
    }
    prompt.push_str("\nBe specific, structured, and provide clear explanations.");

    Ok(EvaluationPrompt::new(RESUME_REVIEW_SYSTEM, prompt))
}
