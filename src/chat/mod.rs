mod api;
mod controller;

pub use api::{ChatBackend, ChatError, ChatResult, FALLBACK_NOTICE, HttpChatBackend};
pub use controller::{ChatController, TurnOutcome};
