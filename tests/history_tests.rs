//! Integration tests for the persisted chat history.

use parakeet::history::{HistoryStore, MAX_TURNS};
use parakeet::storage;
use parakeet::types::{ChatTurn, Sender};

const HISTORY_KEY: &str = "chat_history";

fn turn(n: usize) -> ChatTurn {
    ChatTurn::now(Sender::User, format!("turn {}", n))
}

#[test]
fn append_caps_at_newest_100_dropping_oldest() {
    let profile = "test-history-cap";
    let _ = storage::clear_profile(profile);

    let mut store = HistoryStore::open(profile);
    for n in 0..=MAX_TURNS {
        store.append(turn(n));
    }

    assert_eq!(store.len(), MAX_TURNS);
    // turn 0 was evicted, turn 1 is now oldest
    assert_eq!(store.turns()[0].message, "turn 1");
    assert_eq!(store.turns()[MAX_TURNS - 1].message, format!("turn {}", MAX_TURNS));

    // The cap survives a reload
    let reopened = HistoryStore::open(profile);
    assert_eq!(reopened.len(), MAX_TURNS);
    assert_eq!(reopened.turns()[0].message, "turn 1");

    let _ = storage::clear_profile(profile);
}

#[test]
fn append_preserves_insertion_order() {
    let profile = "test-history-order";
    let _ = storage::clear_profile(profile);

    let mut store = HistoryStore::open(profile);
    store.append(ChatTurn::now(Sender::User, "hi"));
    store.append(ChatTurn::now(Sender::Ai, "hey"));
    store.append(ChatTurn::now(Sender::User, "ok"));

    let reopened = HistoryStore::open(profile);
    let messages: Vec<&str> = reopened.turns().iter().map(|t| t.message.as_str()).collect();
    assert_eq!(messages, vec!["hi", "hey", "ok"]);
    assert_eq!(reopened.turns()[1].sender, Sender::Ai);

    let _ = storage::clear_profile(profile);
}

#[test]
fn clear_empties_and_removes_persisted_key() {
    let profile = "test-history-clear";
    let _ = storage::clear_profile(profile);

    let mut store = HistoryStore::open(profile);
    store.append(turn(1));
    store.append(turn(2));
    assert!(storage::get(profile, HISTORY_KEY).is_some());

    store.clear();
    assert!(store.is_empty());
    // The key is gone entirely, not set to an empty array
    assert_eq!(storage::get(profile, HISTORY_KEY), None);

    let reopened = HistoryStore::open(profile);
    assert!(reopened.is_empty());

    let _ = storage::clear_profile(profile);
}

#[test]
fn corrupt_blob_fails_open_as_empty() {
    let profile = "test-history-corrupt";
    let _ = storage::clear_profile(profile);

    storage::set(profile, HISTORY_KEY, "{ not json ]").expect("seed corrupt blob");
    let store = HistoryStore::open(profile);
    assert!(store.is_empty());

    let _ = storage::clear_profile(profile);
}

#[test]
fn missing_blob_loads_empty() {
    let profile = "test-history-missing";
    let _ = storage::clear_profile(profile);

    let store = HistoryStore::open(profile);
    assert!(store.is_empty());
}
