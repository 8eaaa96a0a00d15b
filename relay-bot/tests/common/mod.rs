//! Test doubles shared by the relay-bot integration tests: a recording [`Bot`], a scripted
//! provider and message builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use generation_client::{GenerationProvider, OperationRequest, Payload};
use relay_bot::{
    AuthorizationGate, Executor, Orchestrator, OrchestratorSettings, StaticAllowList,
};
use relay_core::{Bot, Chat, MarkupDialect, Message, PresenceSignal, RelayError, Result, User};

/// One recorded outbound call, in the order the bot saw them.
#[derive(Debug, Clone, PartialEq)]
pub enum BotEvent {
    Action(PresenceSignal),
    Reply {
        text: String,
        dialect: MarkupDialect,
        reply_to: String,
    },
    Photo {
        len: usize,
        reply_to: String,
    },
}

/// Records every call. `fail_reply_on(n)` makes the n-th `reply_to` call (1-based) fail.
#[derive(Default)]
pub struct RecordingBot {
    events: Mutex<Vec<BotEvent>>,
    replies: AtomicUsize,
    fail_reply_on: Option<usize>,
}

impl RecordingBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_reply(n: usize) -> Arc<Self> {
        Arc::new(Self {
            fail_reply_on: Some(n),
            ..Default::default()
        })
    }

    pub fn events(&self) -> Vec<BotEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<(String, MarkupDialect)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                BotEvent::Reply { text, dialect, .. } => Some((text, dialect)),
                _ => None,
            })
            .collect()
    }

    pub fn actions(&self) -> Vec<PresenceSignal> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                BotEvent::Action(signal) => Some(signal),
                _ => None,
            })
            .collect()
    }

    /// True when every presence signal was recorded before the first non-signal event.
    pub fn signals_precede_responses(&self) -> bool {
        let events = self.events();
        match events.iter().position(|e| !matches!(e, BotEvent::Action(_))) {
            Some(first_response) => events[first_response..]
                .iter()
                .all(|e| !matches!(e, BotEvent::Action(_))),
            None => true,
        }
    }

    fn push(&self, event: BotEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn reply_to(&self, message: &Message, text: &str, dialect: MarkupDialect) -> Result<()> {
        let n = self.replies.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_reply_on == Some(n) {
            return Err(RelayError::Bot("Bad Request: message is too long".to_string()));
        }
        self.push(BotEvent::Reply {
            text: text.to_string(),
            dialect,
            reply_to: message.id.clone(),
        });
        Ok(())
    }

    async fn reply_photo(&self, message: &Message, photo: Vec<u8>) -> Result<()> {
        self.push(BotEvent::Photo {
            len: photo.len(),
            reply_to: message.id.clone(),
        });
        Ok(())
    }

    async fn send_chat_action(&self, _chat: &Chat, signal: PresenceSignal) -> Result<()> {
        self.push(BotEvent::Action(signal));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum Script {
    Text(String),
    Image(Vec<u8>),
    Empty,
    Fail(String),
    Panic,
}

/// Provider that waits `delay`, then plays back `script`. Counts calls.
pub struct ScriptedProvider {
    delay: Duration,
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: Script, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            script,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn generate(&self, _request: &OperationRequest) -> anyhow::Result<Option<Payload>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        match &self.script {
            Script::Text(text) => Ok(Some(Payload::Text(text.clone()))),
            Script::Image(bytes) => Ok(Some(Payload::Image(bytes.clone()))),
            Script::Empty => Ok(None),
            Script::Fail(cause) => Err(anyhow::anyhow!("{}", cause)),
            Script::Panic => panic!("scripted provider panic"),
        }
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn message(user_id: i64, message_id: &str, content: &str) -> Message {
    Message {
        id: message_id.to_string(),
        user: user(user_id),
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
        reply_to_message_id: None,
    }
}

pub fn settings() -> OrchestratorSettings {
    OrchestratorSettings {
        presence_interval: Duration::from_secs(1),
        max_message_len: 4096,
        dialect: MarkupDialect::MarkdownV2,
    }
}

/// Orchestrator over a static allow-list.
pub fn orchestrator(
    bot: Arc<RecordingBot>,
    provider: Arc<ScriptedProvider>,
    allowed: &[i64],
    settings: OrchestratorSettings,
) -> Orchestrator {
    Orchestrator::new(
        bot,
        AuthorizationGate::new(Arc::new(StaticAllowList::new(allowed.iter().copied()))),
        Executor::new(provider),
        settings,
    )
}
