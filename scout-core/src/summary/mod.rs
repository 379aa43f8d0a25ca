//! Issue summaries.
//!
//! [`quick_summary`] is free and offline. [`IssueAnalyzer`] asks a
//! [`TextGenerator`] for a summary plus an assistant prompt and falls back to a
//! title-based answer whenever that does not work out.

mod analyzer;
mod gemini;
#[cfg(test)]
pub(crate) mod mock;
mod quick;
mod traits;

pub use analyzer::{analysis_prompt, fallback_analysis, parse_analysis, IssueAnalysis, IssueAnalyzer};
pub use gemini::{GeminiGenerator, GEMINI_API_URL, GEMINI_MODEL};
pub use quick::{clean_markdown, quick_summary};
pub use traits::TextGenerator;
