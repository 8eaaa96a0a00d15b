//! # Request orchestrator
//!
//! Per-request state machine:
//!
//! ```text
//! Received -> Gated -> Rejected
//!                   -> Running -> Completed | Errored
//! ```
//!
//! The liveness indicator runs for exactly the executor call and is stopped (and joined) before
//! anything is delivered, on every path. Failures are absorbed here; [`Orchestrator::run`] never
//! returns an error to the transport.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use generation_client::{OperationKind, OperationRequest, Payload};
use relay_core::{Bot, MarkupDialect, Message, PresenceSignal};
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};
use uuid::Uuid;

use crate::executor::{Executor, OperationOutcome};
use crate::format::{chunk, escape, MAX_MESSAGE_LEN};
use crate::gate::AuthorizationGate;
use crate::indicator::{LivenessIndicator, DEFAULT_PRESENCE_INTERVAL};

pub const MSG_NOT_ALLOWED: &str = "Sorry, you are not allowed to use this bot.";
pub const MSG_TEXT_FAILED: &str = "Sorry, I couldn't process your message at the moment.";
pub const MSG_IMAGE_FAILED: &str = "Sorry, there was an error generating your image.";
pub const MSG_TEXT_EMPTY: &str = "Sorry, the text generation did not succeed.";
pub const MSG_IMAGE_EMPTY: &str = "Sorry, the image generation did not succeed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Received,
    Gated,
    Running,
    Completed,
    Rejected,
    Errored,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Received => "received",
            SessionState::Gated => "gated",
            SessionState::Running => "running",
            SessionState::Completed => "completed",
            SessionState::Rejected => "rejected",
            SessionState::Errored => "errored",
        };
        f.write_str(s)
    }
}

/// Read-only settings shared by all sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub presence_interval: Duration,
    pub max_message_len: usize,
    pub dialect: MarkupDialect,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            presence_interval: DEFAULT_PRESENCE_INTERVAL,
            max_message_len: MAX_MESSAGE_LEN,
            dialect: MarkupDialect::MarkdownV2,
        }
    }
}

pub fn signal_for(kind: OperationKind) -> PresenceSignal {
    match kind {
        OperationKind::Text => PresenceSignal::Typing,
        OperationKind::Image => PresenceSignal::UploadPhoto,
    }
}

fn failure_text(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Text => MSG_TEXT_FAILED,
        OperationKind::Image => MSG_IMAGE_FAILED,
    }
}

fn empty_text(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Text => MSG_TEXT_EMPTY,
        OperationKind::Image => MSG_IMAGE_EMPTY,
    }
}

/// Sequences gate, indicator, executor and delivery for one request at a time. Cheap to share;
/// sessions hold no state in common beyond the allow-list.
pub struct Orchestrator {
    bot: Arc<dyn Bot>,
    gate: AuthorizationGate,
    executor: Executor,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    pub fn new(
        bot: Arc<dyn Bot>,
        gate: AuthorizationGate,
        executor: Executor,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            bot,
            gate,
            executor,
            settings,
        }
    }

    /// Runs one session to a terminal state.
    pub async fn run(&self, message: &Message, request: OperationRequest) -> SessionState {
        let span = info_span!(
            "session",
            session_id = %Uuid::new_v4(),
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            kind = %request.kind,
        );
        let state = self.run_session(message, request).instrument(span.clone()).await;
        span.in_scope(|| info!(state = %state, "Session finished"));
        state
    }

    async fn run_session(&self, message: &Message, request: OperationRequest) -> SessionState {
        debug!(state = %SessionState::Received, "Session started");

        let permitted = match self.gate.is_permitted(message.user.id).await {
            Ok(permitted) => permitted,
            Err(e) => {
                error!(error = %e, "Authorization gate unavailable, denying request");
                false
            }
        };
        debug!(state = %SessionState::Gated, permitted, "Gate checked");

        if !permitted {
            info!(user_id = message.user.id, "Requester not permitted");
            self.send_control(message, MSG_NOT_ALLOWED).await;
            return SessionState::Rejected;
        }

        let kind = request.kind;
        let mut indicator = LivenessIndicator::start(
            Arc::clone(&self.bot),
            message.chat.clone(),
            signal_for(kind),
            self.settings.presence_interval,
        );
        debug!(state = %SessionState::Running, "Operation started");

        let outcome = self.executor.execute(&request).await;
        indicator.stop().await;

        match outcome {
            OperationOutcome::Success(payload) => match self.deliver(message, payload).await {
                Ok(()) => SessionState::Completed,
                Err(e) => {
                    error!(error = %e, "Delivery failed, remaining output dropped");
                    self.send_control(message, failure_text(kind)).await;
                    SessionState::Errored
                }
            },
            OperationOutcome::Empty => {
                warn!("Provider returned an empty result");
                self.send_control(message, empty_text(kind)).await;
                SessionState::Completed
            }
            OperationOutcome::Failure(cause) => {
                error!(cause = %cause, "Provider call failed");
                self.send_control(message, failure_text(kind)).await;
                SessionState::Errored
            }
        }
    }

    /// Text is escaped for the configured dialect, then chunked; images pass through as photos.
    #[instrument(skip(self, message, payload))]
    async fn deliver(&self, message: &Message, payload: Payload) -> relay_core::Result<()> {
        match payload {
            Payload::Text(text) => {
                let escaped = escape(&text, self.settings.dialect);
                let chunks = chunk(&escaped, self.settings.max_message_len);
                let total = chunks.len();
                for (index, piece) in chunks.iter().enumerate() {
                    self.bot
                        .reply_to(message, piece, self.settings.dialect)
                        .await?;
                    debug!(chunk = index + 1, total, len = piece.chars().count(), "Chunk delivered");
                }
                info!(chunks = total, "Text reply delivered");
            }
            Payload::Image(bytes) => {
                let size = bytes.len();
                self.bot.reply_photo(message, bytes).await?;
                info!(bytes = size, "Image reply delivered");
            }
        }
        Ok(())
    }

    /// Fixed notices go out without a parse mode; a send failure is only logged.
    async fn send_control(&self, message: &Message, text: &str) {
        if let Err(e) = self.bot.reply_to(message, text, MarkupDialect::Plain).await {
            error!(error = %e, "Failed to send notice to requester");
        }
    }
}
