//! Bounded, persisted chat history.
//!
//! The whole log lives under one storage key as a JSON array and is
//! rewritten on every mutation. There is exactly one writer per profile
//! (the current session), so no locking is needed.

use crate::storage;
use crate::types::ChatTurn;
use tracing::warn;

const HISTORY_KEY: &str = "chat_history";

/// Maximum number of persisted turns; oldest are dropped first.
pub const MAX_TURNS: usize = 100;

pub struct HistoryStore {
    profile: String,
    turns: Vec<ChatTurn>,
}

impl HistoryStore {
    /// Loads the persisted log for a profile. Missing or corrupt data is
    /// treated as an empty history.
    pub fn open(profile: impl Into<String>) -> Self {
        let profile = profile.into();
        let turns = storage::get(&profile, HISTORY_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<ChatTurn>>(&raw) {
                Ok(turns) => Some(turns),
                Err(err) => {
                    warn!("discarding unreadable chat history: {}", err);
                    None
                }
            })
            .unwrap_or_default();
        Self { profile, turns }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends a turn, truncates to the newest [`MAX_TURNS`], and rewrites
    /// the persisted blob. Persistence is best effort.
    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
        if self.turns.len() > MAX_TURNS {
            let excess = self.turns.len() - MAX_TURNS;
            self.turns.drain(..excess);
        }
        self.persist();
    }

    /// Empties the log and removes the persisted key entirely.
    pub fn clear(&mut self) {
        self.turns.clear();
        if let Err(err) = storage::remove(&self.profile, HISTORY_KEY) {
            warn!("failed to remove chat history: {}", err);
        }
    }

    fn persist(&self) {
        match serde_json::to_string(&self.turns) {
            Ok(raw) => {
                if let Err(err) = storage::set(&self.profile, HISTORY_KEY, &raw) {
                    warn!("failed to persist chat history: {}", err);
                }
            }
            Err(err) => warn!("failed to serialize chat history: {}", err),
        }
    }
}
