//! Liveness indicator: re-emits a presence signal at a fixed cadence while an operation runs.
//!
//! A single chat action expires on the client after a few seconds, so long operations need it
//! repeated. The loop runs on its own task and is stopped through a [`CancellationToken`];
//! [`IndicatorHandle::stop`] joins the task, so nothing is emitted once it returns.

use std::sync::Arc;
use std::time::Duration;

use relay_core::{Bot, Chat, PresenceSignal};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Reference cadence.
pub const DEFAULT_PRESENCE_INTERVAL: Duration = Duration::from_secs(1);

pub struct LivenessIndicator;

impl LivenessIndicator {
    /// Spawns the signal loop. The first signal goes out immediately, then one per `interval`.
    pub fn start(
        bot: Arc<dyn Bot>,
        chat: Chat,
        signal: PresenceSignal,
        interval: Duration,
    ) -> IndicatorHandle {
        let token = CancellationToken::new();

        let loop_token = token.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = loop_token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = bot.send_chat_action(&chat, signal).await {
                            debug!(error = %e, chat_id = chat.id, signal = %signal, "Presence signal not delivered");
                        }
                    }
                }
            }
        });

        IndicatorHandle {
            token,
            task: Some(task),
        }
    }
}

/// Owner side of a running indicator. Dropping it cancels the loop without waiting.
pub struct IndicatorHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl IndicatorHandle {
    /// True until [`stop`](Self::stop) has joined the loop.
    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Cancels the loop and waits for it to exit, including any emission in flight. Idempotent.
    pub async fn stop(&mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Liveness indicator task ended abnormally");
            }
        }
    }
}

impl Drop for IndicatorHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
