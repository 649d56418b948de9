//! Send state machine: Idle → Sending → (reply | notice) → Idle.
//!
//! The controller owns the history and the backend handle but touches no
//! UI; the view layer renders the turns and outcomes it hands back. At most
//! one send is in flight — `begin_send` refuses while one is outstanding.

use crate::chat::api::{ChatBackend, ChatResult};
use crate::history::HistoryStore;
use crate::types::{ChatTurn, Sender};
use std::sync::Arc;
use tracing::warn;

/// Terminal result of one send operation.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    /// The server replied; the turn is already persisted.
    Reply(ChatTurn),
    /// The send failed; the notice text is ephemeral and never persisted.
    Notice(String),
}

pub struct ChatController {
    history: HistoryStore,
    backend: Arc<dyn ChatBackend>,
    sending: bool,
}

impl ChatController {
    pub fn new(history: HistoryStore, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            history,
            backend,
            sending: false,
        }
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Handle for the spawned network call.
    pub fn backend(&self) -> Arc<dyn ChatBackend> {
        Arc::clone(&self.backend)
    }

    /// Persisted turns for hydrating the message list. Error notices are
    /// never stored, so they never replay.
    pub fn replay(&self) -> &[ChatTurn] {
        self.history.turns()
    }

    /// Idle → Sending. Trims the input; empty input and overlapping sends
    /// are rejected. The user turn is persisted immediately (optimistic,
    /// not rolled back on failure) and returned for rendering.
    pub fn begin_send(&mut self, raw: &str) -> Option<ChatTurn> {
        let text = raw.trim();
        if text.is_empty() || self.sending {
            return None;
        }
        self.sending = true;
        let turn = ChatTurn::now(Sender::User, text);
        self.history.append(turn.clone());
        Some(turn)
    }

    /// Sending → Idle. On success the AI turn is persisted and returned;
    /// on failure the error is logged and mapped to an ephemeral notice.
    pub fn finish_send(&mut self, result: ChatResult<String>) -> TurnOutcome {
        self.sending = false;
        match result {
            Ok(reply) => {
                let turn = ChatTurn::now(Sender::Ai, reply);
                self.history.append(turn.clone());
                TurnOutcome::Reply(turn)
            }
            Err(err) => {
                warn!("chat send failed: {}", err);
                TurnOutcome::Notice(err.user_notice())
            }
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
