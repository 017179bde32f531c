// Resume review pipeline: upload → PDF text → prompt → Gemini → review text.
// All model calls go through llm_client — nothing here talks HTTP to Google.

pub mod evaluator;
pub mod extractor;
pub mod handlers;
pub mod prompts;
