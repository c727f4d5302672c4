//! Single-flight bridge between the UI loop and a [`ModelClient`].
//!
//! At most one request is pending at a time. Each request runs on its own
//! worker thread and reports back over a channel the UI drains every tick.
//! Cancelling frees the slot immediately; a blocking HTTP call cannot be
//! interrupted, so its late reply is recognised by id and dropped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use rust_i18n::t;

use crate::chat::ChatMessage;
use crate::chat::client::{BridgeError, CancelToken, ChatRequest, ModelClient};
use crate::chat::prompt::build_system_instruction;
use crate::locale::Language;
use crate::mode::Mode;

pub const DEFAULT_HISTORY_TURNS: usize = 10;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug, PartialEq)]
pub struct ChatReply {
    pub request_id: u64,
    pub text: String,
    /// True when `text` is the localized apology rather than model output.
    pub fell_back: bool,
}

struct Outcome {
    id: u64,
    result: Result<String, BridgeError>,
}

struct Pending {
    id: u64,
    cancel: CancelToken,
    language: Language,
}

pub struct ChatBridge {
    client: Arc<dyn ModelClient>,
    history_turns: usize,
    temperature: f32,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
    next_id: u64,
    pending: Option<Pending>,
}

impl ChatBridge {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            history_turns: DEFAULT_HISTORY_TURNS,
            temperature: DEFAULT_TEMPERATURE,
            tx,
            rx,
            next_id: 1,
            pending: None,
        }
    }

    pub fn with_history_turns(mut self, turns: usize) -> Self {
        self.history_turns = turns;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Dispatch `message` with the tail of `history`. `history` must not
    /// already contain `message`. Fails with [`BridgeError::Busy`] while a
    /// previous reply is outstanding; nothing is queued.
    pub fn send(
        &mut self,
        history: &[ChatMessage],
        message: &str,
        mode: Mode,
        language: Language,
    ) -> Result<u64, BridgeError> {
        if self.pending.is_some() {
            tracing::warn!("chat send rejected: reply already pending");
            return Err(BridgeError::Busy);
        }

        let start = history.len().saturating_sub(self.history_turns);
        let request = ChatRequest {
            system: build_system_instruction(mode, language),
            history: history[start..].to_vec(),
            message: message.to_string(),
            temperature: self.temperature,
        };

        let id = self.next_id;
        self.next_id += 1;

        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let turns = request.history.len();

        thread::Builder::new()
            .name(format!("chat-request-{id}"))
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    client.generate(&request, &worker_cancel)
                }))
                .unwrap_or_else(|_| Err(BridgeError::Request("model client panicked".to_string())));
                let result = if worker_cancel.is_cancelled() {
                    Err(BridgeError::Cancelled)
                } else {
                    result
                };
                let _ = tx.send(Outcome { id, result });
            })
            .map_err(|e| BridgeError::Request(e.to_string()))?;

        self.pending = Some(Pending {
            id,
            cancel,
            language,
        });
        tracing::info!(id, mode = mode.api_name(), turns, "chat request dispatched");
        Ok(id)
    }

    /// Abandon the pending request, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.cancel.cancel();
                tracing::info!(id = pending.id, "chat request cancelled");
                true
            }
            None => false,
        }
    }

    /// Non-blocking: the reply for the pending request if it has arrived.
    pub fn poll(&mut self) -> Option<ChatReply> {
        while let Ok(outcome) = self.rx.try_recv() {
            if let Some(reply) = self.accept(outcome) {
                return Some(reply);
            }
        }
        None
    }

    /// Block up to `timeout` for the pending reply.
    pub fn wait(&mut self, timeout: Duration) -> Option<ChatReply> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.pending.is_none() {
                return None;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(outcome) => {
                    if let Some(reply) = self.accept(outcome) {
                        return Some(reply);
                    }
                }
                Err(_) => return None,
            }
        }
    }

    fn accept(&mut self, outcome: Outcome) -> Option<ChatReply> {
        let is_current = self.pending.as_ref().is_some_and(|p| p.id == outcome.id);
        if !is_current {
            tracing::debug!(id = outcome.id, "discarding stale chat reply");
            return None;
        }
        let pending = self.pending.take()?;
        Some(resolve(outcome.id, outcome.result, pending.language))
    }
}

fn resolve(id: u64, result: Result<String, BridgeError>, language: Language) -> ChatReply {
    match result {
        Ok(text) => {
            tracing::info!(id, chars = text.chars().count(), "chat reply received");
            ChatReply {
                request_id: id,
                text,
                fell_back: false,
            }
        }
        Err(err) => {
            if matches!(err, BridgeError::EmptyResponse) {
                tracing::warn!(id, "model returned no text");
            } else {
                tracing::error!(id, %err, "chat request failed");
            }
            ChatReply {
                request_id: id,
                text: fallback_text(&err, language),
                fell_back: true,
            }
        }
    }
}

/// Localized apology shown in place of a reply.
pub fn fallback_text(err: &BridgeError, language: Language) -> String {
    match err {
        BridgeError::EmptyResponse => t!("chat.fallback_empty", locale = language.code()),
        _ => t!("chat.fallback_error", locale = language.code()),
    }
    .into_owned()
}
