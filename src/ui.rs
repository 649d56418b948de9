use crate::chat::HttpChatBackend;
use crate::theme::{NO_TRANSITION_CSS, ThemeStore, theme_definition};
use crate::types::ThemeSetting;
use crate::views::{AboutView, ChatView};
use dioxus::prelude::*;
use std::time::Duration;

const PARAKEET_CSS: Asset = asset!("/assets/parakeet.css");

/// How long theme transitions stay suppressed after a toggle, so the new
/// theme class snaps into place instead of animating.
const TRANSITION_SUPPRESS_WINDOW: Duration = Duration::from_millis(120);

pub fn profile_from_env() -> String {
    std::env::var("PARAKEET_PROFILE").unwrap_or_else(|_| "default".to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppTab {
    Chat,
    About,
}

#[component]
pub fn App() -> Element {
    let theme_store = use_signal(|| ThemeStore::open(profile_from_env()));
    let theme = use_signal(|| theme_store.peek().setting());
    let no_transitions = use_signal(|| false);
    let active_tab = use_signal(|| AppTab::Chat);
    let mut nav_open = use_signal(|| false);
    let online = use_signal(|| Option::<bool>::None);

    use_health_probe(online);

    let definition = theme_definition(theme());

    rsx! {
        ThemeStyles { theme, no_transitions }
        div {
            class: "{definition.body_class}",
            // Any click that bubbles up to the root closes the nav panel
            onclick: move |_| nav_open.set(false),
            AppHeader { theme_store, theme, no_transitions, nav_open, online }
            NavPanel { active_tab, nav_open }
            TabPanels { active_tab }
        }
    }
}

fn use_health_probe(online: Signal<Option<bool>>) {
    use_effect(move || {
        let mut online = online;
        spawn(async move {
            let reachable = HttpChatBackend::from_env().probe_health().await;
            online.set(Some(reachable));
        });
    });
}

#[component]
fn ThemeStyles(theme: Signal<ThemeSetting>, no_transitions: Signal<bool>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: PARAKEET_CSS }
        style { dangerous_inner_html: "{definition.css}" }
        if no_transitions() {
            style { dangerous_inner_html: "{NO_TRANSITION_CSS}" }
        }
    }
}

#[component]
fn AppHeader(
    theme_store: Signal<ThemeStore>,
    theme: Signal<ThemeSetting>,
    no_transitions: Signal<bool>,
    nav_open: Signal<bool>,
    online: Signal<Option<bool>>,
) -> Element {
    let mut theme = theme;
    let mut no_transitions = no_transitions;
    let mut theme_store = theme_store;
    let mut nav_open = nav_open;

    let toggle_theme = move |_| {
        let next = theme_store.with_mut(|store| store.toggle());
        no_transitions.set(true);
        theme.set(next);
        spawn(async move {
            tokio::time::sleep(TRANSITION_SUPPRESS_WINDOW).await;
            no_transitions.set(false);
        });
    };

    let dot_class = match online() {
        Some(true) => "status-dot online",
        Some(false) => "status-dot offline",
        None => "status-dot",
    };

    rsx! {
        div { class: "header",
            div { class: "header-content",
                button {
                    class: "nav-toggle",
                    r#type: "button",
                    aria_label: "Menu",
                    onclick: move |ev| {
                        ev.stop_propagation();
                        let open = nav_open();
                        nav_open.set(!open);
                    },
                    if nav_open() { "✕" } else { "☰" }
                }
                span { class: "header-wordmark", "parakeet" }
                span { class: dot_class }
                button {
                    class: "theme-switch",
                    r#type: "button",
                    aria_label: "Toggle theme",
                    onclick: toggle_theme,
                    span { class: "icon-sun", "☀" }
                    span { class: "switch-track", span { class: "switch-knob" } }
                    span { class: "icon-moon", "☾" }
                }
            }
        }
    }
}

#[component]
fn NavPanel(active_tab: Signal<AppTab>, nav_open: Signal<bool>) -> Element {
    let class = if nav_open() { "nav-panel open" } else { "nav-panel" };
    rsx! {
        nav {
            class: class,
            onclick: move |ev| ev.stop_propagation(),
            NavLink { active_tab, nav_open, tab: AppTab::Chat, label: "Chat" }
            NavLink { active_tab, nav_open, tab: AppTab::About, label: "About" }
        }
    }
}

#[component]
fn NavLink(
    active_tab: Signal<AppTab>,
    nav_open: Signal<bool>,
    tab: AppTab,
    label: &'static str,
) -> Element {
    let mut active_tab = active_tab;
    let mut nav_open = nav_open;
    let class = if active_tab() == tab {
        "nav-link active"
    } else {
        "nav-link"
    };
    rsx! {
        a {
            class: class,
            // Selecting a destination always closes the panel
            onclick: move |_| {
                active_tab.set(tab);
                nav_open.set(false);
            },
            "{label}"
        }
    }
}

#[component]
fn TabPanels(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "tab-panels",
            TabPanel {
                active_tab,
                tab: AppTab::Chat,
                children: rsx!( ChatView {} ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::About,
                children: rsx!( AboutView {} ),
            }
        }
    }
}

#[component]
fn TabPanel(active_tab: Signal<AppTab>, tab: AppTab, children: Element) -> Element {
    let is_active = active_tab() == tab;
    let class_suffix = if is_active { "active" } else { "" };
    rsx! {
        div {
            class: format_args!("tab-panel {}", class_suffix),
            aria_hidden: (!is_active).to_string(),
            {children}
        }
    }
}
