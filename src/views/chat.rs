use crate::chat::{ChatController, HttpChatBackend, TurnOutcome};
use crate::history::HistoryStore;
use crate::render::{BubbleRole, avatar_glyph, render_markup, timestamp_label};
use crate::types::{ChatTurn, Sender};
use crate::ui::profile_from_env;
use dioxus::events::Key;
use dioxus::prelude::*;
use std::sync::Arc;

const WELCOME_TEXT: &str =
    "Hey! I'm **Parakeet**. Ask me anything and I'll pass it along to the flock.";

/// One rendered bubble. For user/ai bubbles `body` holds the expanded
/// markup fragment; for error bubbles it holds the verbatim text.
#[derive(Clone, Debug, PartialEq)]
struct Bubble {
    role: BubbleRole,
    body: String,
    timestamp: Option<String>,
}

impl Bubble {
    fn from_turn(turn: &ChatTurn) -> Self {
        let role = match turn.sender {
            Sender::User => BubbleRole::User,
            Sender::Ai => BubbleRole::Ai,
        };
        Self {
            role,
            body: render_markup(&turn.message),
            timestamp: timestamp_label(&turn.timestamp),
        }
    }

    fn error(notice: String) -> Self {
        Self {
            role: BubbleRole::Error,
            body: notice,
            timestamp: None,
        }
    }
}

fn new_controller() -> ChatController {
    let profile = profile_from_env();
    ChatController::new(
        HistoryStore::open(&profile),
        Arc::new(HttpChatBackend::from_env()),
    )
}

fn refocus_composer() {
    let _ = document::eval("document.querySelector('.composer textarea')?.focus();");
}

#[component]
pub fn ChatView() -> Element {
    let controller = use_signal(new_controller);
    // Hydrate from persisted history through the same render path as live
    // messages; error notices are never persisted, so none replay.
    let bubbles = use_signal(|| {
        controller
            .peek()
            .replay()
            .iter()
            .map(Bubble::from_turn)
            .collect::<Vec<_>>()
    });
    let mut input = use_signal(String::new);
    let sending = use_signal(|| false);

    let mut send_message = {
        let mut controller = controller;
        let mut bubbles = bubbles;
        let mut sending_signal = sending;
        let mut input_signal = input;
        move |text: String| {
            let Some(user_turn) = controller.with_mut(|c| c.begin_send(&text)) else {
                return;
            };

            input_signal.set(String::new());
            sending_signal.set(true);
            bubbles.with_mut(|list| list.push(Bubble::from_turn(&user_turn)));

            let backend = controller.with(|c| c.backend());
            spawn(async move {
                let result = backend.send(&user_turn.message).await;
                let outcome = controller.with_mut(|c| c.finish_send(result));
                bubbles.with_mut(|list| {
                    list.push(match outcome {
                        TurnOutcome::Reply(turn) => Bubble::from_turn(&turn),
                        TurnOutcome::Notice(notice) => Bubble::error(notice),
                    });
                });
                sending_signal.set(false);
                refocus_composer();
            });
        }
    };

    let clear_history = {
        let mut controller = controller;
        let mut bubbles = bubbles;
        move |_| {
            controller.with_mut(|c| c.clear_history());
            bubbles.set(Vec::new());
        }
    };

    let bubbles_snapshot = bubbles();
    let welcome = Bubble {
        role: BubbleRole::Ai,
        body: render_markup(WELCOME_TEXT),
        timestamp: None,
    };

    rsx! {
        div { class: "main-container",
            div { class: "chat-wrap",
                div { class: "chat-toolbar",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: clear_history,
                        "Clear history"
                    }
                }
                div { id: "chat-list", class: "chat-list",
                    // Fixed welcome bubble, always first, never persisted
                    MessageRow { bubble: welcome }
                    for bubble in bubbles_snapshot.iter() {
                        MessageRow { bubble: bubble.clone() }
                    }
                    if sending() {
                        div { class: "message-row ai",
                            div { class: "avatar ai", "P" }
                            div { class: "typing-indicator", "Typing…" }
                        }
                    }
                }
            }

            form { class: "composer",
                div { class: "composer-inner",
                    textarea {
                        rows: "1",
                        placeholder: "Say something…",
                        value: "{input}",
                        oninput: move |ev| input.set(ev.value()),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                ev.prevent_default();
                                let text = input();
                                send_message(text);
                            }
                        },
                        disabled: sending(),
                        autofocus: true,
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: sending() || input().trim().is_empty(),
                        onclick: move |_| {
                            let text = input();
                            send_message(text);
                        },
                        "Send"
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(bubble: Bubble) -> Element {
    let (row_class, bubble_class) = match bubble.role {
        BubbleRole::User => ("message-row user", "bubble user"),
        BubbleRole::Ai => ("message-row ai", "bubble ai"),
        BubbleRole::Error => ("message-row error", "bubble error"),
    };
    rsx! {
        div { class: row_class,
            if let Some(glyph) = avatar_glyph(bubble.role) {
                div {
                    class: format_args!(
                        "avatar {}",
                        match bubble.role { BubbleRole::User => "user", _ => "ai" }
                    ),
                    "{glyph}"
                }
            }
            div { class: "message-stack",
                if bubble.role == BubbleRole::Error {
                    // Verbatim text, no markup expansion
                    div { class: bubble_class, "{bubble.body}" }
                } else {
                    div { class: bubble_class, dangerous_inner_html: "{bubble.body}" }
                }
                if let Some(ts) = bubble.timestamp.as_ref() {
                    div {
                        class: format_args!(
                            "message-meta {}",
                            match bubble.role { BubbleRole::User => "align-end", _ => "align-start" }
                        ),
                        span { class: "message-timestamp", "{ts}" }
                    }
                }
            }
        }
    }
}
