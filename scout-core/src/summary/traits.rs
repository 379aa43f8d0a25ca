use async_trait::async_trait;

use crate::Result;

/// Trait for free-text generation by an external model.
///
/// Abstracts the provider (Gemini, mocks) so issue analysis can be tested
/// offline.
///
/// # Example
///
/// ```ignore
/// let generator = GeminiGenerator::new(api_key, GEMINI_MODEL, GEMINI_API_URL)?;
/// let text = generator.generate("Summarize: ...").await?;
/// ```
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt`. Transport failures are `Network`, unusable replies
    /// are `MalformedResponse`.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify the trait is object-safe
    fn _assert_generator_object_safe(_: &dyn TextGenerator) {}
}
