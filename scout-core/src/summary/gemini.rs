//! Gemini text generation over the REST API.
//!
//! One `POST {api_url}/models/{model}:generateContent` per prompt with a
//! single user part; the reply text is the concatenated parts of the first
//! candidate.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::TextGenerator;
use crate::config::AiSettings;
use crate::{ExplorerError, Result};

pub const GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// [`TextGenerator`] backed by Google's `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    http: reqwest::Client,
    endpoint: String,
}

impl GeminiGenerator {
    pub fn new(api_key: &str, model: &str, api_url: &str) -> Result<Self> {
        let mut key = HeaderValue::from_str(api_key.trim())
            .map_err(|e| ExplorerError::validation(format!("Invalid Gemini API key: {}", e)))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ExplorerError::validation(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/models/{}:generateContent",
                api_url.trim_end_matches('/'),
                model
            ),
        })
    }

    /// Build from settings.
    ///
    /// Returns `None` if no API key is configured, or `Some(Err)` if the
    /// client can't be created for another reason.
    pub fn try_from_settings(settings: &AiSettings) -> Option<Result<Self>> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())?;
        Some(Self::new(api_key, &settings.model, &settings.api_url))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };

        debug!(endpoint = %self.endpoint, "Gemini request");
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExplorerError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ExplorerError::Network(format!(
                "Gemini returned {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        let response: GenerateResponse = resp.json().await.map_err(|e| {
            ExplorerError::MalformedResponse(format!("Gemini response is not JSON: {}", e))
        })?;
        extract_text(response)
    }
}

fn extract_text(response: GenerateResponse) -> Result<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ExplorerError::MalformedResponse(
            "Gemini returned no text".to_string(),
        ));
    }
    Ok(text)
}
