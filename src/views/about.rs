use dioxus::prelude::*;

#[component]
pub fn AboutView() -> Element {
    rsx! {
        div { class: "main-container",
            div { class: "about-section",
                h3 { class: "section-title", "About" }
                p {
                    "Parakeet is a small chat client. Messages go to a single "
                    "chat endpoint; the conversation lives on this device and "
                    "keeps the last 100 turns."
                }
                p { class: "text-muted",
                    "Inline formatting: **bold**, *italic*, __underline__, "
                    "~~strikethrough~~, `code`, links, and @mentions."
                }
            }
        }
    }
}
