//! Gemini `generateContent` REST client.
//!
//! Blocking `reqwest` wrapper; body construction and response parsing are
//! pure functions so they can be tested without the network.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chat::Role;
use crate::chat::client::{BridgeError, CancelToken, ChatRequest, ModelClient};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const CONNECT_TIMEOUT_SECS: u64 = 10;

pub struct GeminiClient {
    #[cfg(feature = "network")]
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, BridgeError> {
        #[cfg(feature = "network")]
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()
            .map_err(|e| BridgeError::HttpClientBuild(e.to_string()))?;
        #[cfg(not(feature = "network"))]
        let _ = (timeout, CONNECT_TIMEOUT_SECS);

        Ok(Self {
            #[cfg(feature = "network")]
            http,
            api_key,
            model,
            base_url,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl ModelClient for GeminiClient {
    #[cfg(feature = "network")]
    fn generate(&self, request: &ChatRequest, cancel: &CancelToken) -> Result<String, BridgeError> {
        if cancel.is_cancelled() {
            return Err(BridgeError::Cancelled);
        }

        let body = build_body(request);
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| BridgeError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| BridgeError::Request(e.to_string()))?;

        if cancel.is_cancelled() {
            return Err(BridgeError::Cancelled);
        }
        if !(200..300).contains(&status) {
            return Err(BridgeError::Status { code: status, body: text });
        }

        parse_response(&text)
    }

    #[cfg(not(feature = "network"))]
    fn generate(&self, _request: &ChatRequest, _cancel: &CancelToken) -> Result<String, BridgeError> {
        let _ = &self.api_key;
        Err(BridgeError::Request(
            "built without the `network` feature".to_string(),
        ))
    }
}

// -----------------------------------------------------------------------------
// Wire types
// -----------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
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

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn build_body(request: &ChatRequest) -> GenerateRequest<'_> {
    let mut contents: Vec<Content<'_>> = request
        .history
        .iter()
        .map(|msg| Content {
            role: Some(wire_role(msg.role)),
            parts: vec![Part { text: &msg.text }],
        })
        .collect();
    contents.push(Content {
        role: Some("user"),
        parts: vec![Part {
            text: &request.message,
        }],
    });

    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: &request.system,
            }],
        },
        contents,
        generation_config: GenerationConfig {
            temperature: request.temperature,
        },
    }
}

/// Concatenated text parts of the first candidate.
fn parse_response(json: &str) -> Result<String, BridgeError> {
    let api: GenerateResponse =
        serde_json::from_str(json).map_err(|e| BridgeError::Parse(e.to_string()))?;

    let text: String = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(BridgeError::EmptyResponse)
    } else {
        Ok(text)
    }
}
