//! Gemini `generateContent` REST client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ureq::Agent;

use crate::LanguageModel;
use crate::error::GeminiError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 120;

/// Sync client for the Gemini REST API.
///
/// The API key is supplied per call, so one client serves every request.
pub struct GeminiClient {
    agent: Agent,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: &str, model: &str) -> Self {
        Self::with_timeout(base_url, model, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a client whose requests fail after `timeout`.
    pub fn with_timeout(base_url: &str, model: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
        }
    }

    /// Model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl LanguageModel for GeminiClient {
    fn generate(&self, api_key: &str, prompt: &str) -> Result<String, GeminiError> {
        let url = self.endpoint();
        let payload = serde_json::to_vec(&GenerateRequest::new(prompt))?;

        debug!(model = %self.model, prompt_len = prompt.len(), "Calling Gemini");

        let response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(GeminiError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body: GenerateResponse = serde_json::from_str(&body_reader.read_to_string()?)?;
        let text = body.text();
        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        info!(model = %self.model, response_len = text.len(), "Gemini responded");
        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}
