use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::chat::ChatMessage;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("missing API key: set {var}")]
    MissingApiKey { var: String },
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
    #[error("API request failed: {0}")]
    Request(String),
    #[error("API response error: status {code}")]
    Status { code: u16, body: String },
    #[error("API response parse failed: {0}")]
    Parse(String),
    #[error("model returned no text")]
    EmptyResponse,
    #[error("a reply is already pending")]
    Busy,
    #[error("request cancelled")]
    Cancelled,
}

/// One model turn: persona instructions, prior turns and the new message.
#[derive(Clone, Debug)]
pub struct ChatRequest {
    pub system: String,
    pub history: Vec<ChatMessage>,
    pub message: String,
    pub temperature: f32,
}

/// Shared flag flipped by the bridge when a pending request is abandoned.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Blocking text generation. Called from a worker thread, never the UI thread.
pub trait ModelClient: Send + Sync {
    fn generate(&self, request: &ChatRequest, cancel: &CancelToken) -> Result<String, BridgeError>;
}

/// Stand-in when no API key is configured; every call fails so the UI shows
/// the localized fallback.
pub struct OfflineClient {
    pub var: String,
}

impl ModelClient for OfflineClient {
    fn generate(&self, _request: &ChatRequest, _cancel: &CancelToken) -> Result<String, BridgeError> {
        Err(BridgeError::MissingApiKey {
            var: self.var.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_offline_client_always_fails() {
        let client = OfflineClient {
            var: "GEMINI_API_KEY".to_string(),
        };
        let request = ChatRequest {
            system: String::new(),
            history: Vec::new(),
            message: "hi".to_string(),
            temperature: 0.7,
        };
        let err = client.generate(&request, &CancelToken::new()).unwrap_err();
        assert_eq!(err.to_string(), "missing API key: set GEMINI_API_KEY");
    }
}
