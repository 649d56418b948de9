use crate::storage;
use crate::types::ThemeSetting;
use tracing::warn;

const THEME_KEY: &str = "theme";

/// Injected for a short window after a toggle so re-applying the theme
/// class does not animate every themed property at once.
pub const NO_TRANSITION_CSS: &str = "* { transition: none !important; }";

pub struct ThemeDefinition {
    pub css: &'static str,
    pub body_class: &'static str,
}

pub fn theme_definition(setting: ThemeSetting) -> ThemeDefinition {
    match setting {
        ThemeSetting::Dark => ThemeDefinition {
            css: DARK_THEME,
            body_class: "app-root theme-dark",
        },
        ThemeSetting::Light => ThemeDefinition {
            css: LIGHT_THEME,
            body_class: "app-root theme-light",
        },
    }
}

/// Persisted theme preference. Reads once at startup, writes on every
/// toggle; storage failures are logged and otherwise ignored.
pub struct ThemeStore {
    profile: String,
    setting: ThemeSetting,
}

impl ThemeStore {
    pub fn open(profile: impl Into<String>) -> Self {
        let profile = profile.into();
        let setting = storage::get(&profile, THEME_KEY)
            .and_then(|raw| ThemeSetting::parse(&raw))
            .unwrap_or_default();
        Self { profile, setting }
    }

    pub fn setting(&self) -> ThemeSetting {
        self.setting
    }

    pub fn toggle(&mut self) -> ThemeSetting {
        self.set(self.setting.flipped())
    }

    pub fn set(&mut self, setting: ThemeSetting) -> ThemeSetting {
        self.setting = setting;
        if let Err(err) = storage::set(&self.profile, THEME_KEY, setting.as_str()) {
            warn!("failed to persist theme: {}", err);
        }
        setting
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0d0d10;
    --color-bg-secondary: #16161c;
    --color-text-primary: #f2f2f5;
    --color-text-muted: #9b9ba4;
    --color-border: #2c2c35;
    --color-surface-muted: #1d1d25;
    --color-input-border: #2c2c35;
    --color-input-bg: #121218;
    --color-chat-user-bg: #4f6af5;
    --color-chat-user-text: #ffffff;
    --color-chat-ai-bg: #1d1d25;
    --color-chat-ai-text: #f2f2f5;
    --color-error-border: #e5484d;
    --color-error-text: #ff8589;
    --color-mention: #7da2ff;
    --color-link: #7da2ff;
    --color-code-bg: #26262f;
    --color-timestamp: #72727c;
    --color-knob: #f2f2f5;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.theme-switch .icon-sun { opacity: 0.3; }
.theme-switch .icon-moon { opacity: 1; }
.theme-switch .switch-knob { transform: translateX(1.25rem); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-secondary: #f5f5f7;
    --color-text-primary: #17171c;
    --color-text-muted: #5d5d66;
    --color-border: #d9d9e0;
    --color-surface-muted: #ececf1;
    --color-input-border: #c7c7d1;
    --color-input-bg: #ffffff;
    --color-chat-user-bg: #3d56d6;
    --color-chat-user-text: #ffffff;
    --color-chat-ai-bg: #ececf1;
    --color-chat-ai-text: #17171c;
    --color-error-border: #d6303a;
    --color-error-text: #b3262f;
    --color-mention: #2f4bc4;
    --color-link: #2f4bc4;
    --color-code-bg: #e3e3ea;
    --color-timestamp: #83838c;
    --color-knob: #ffffff;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.theme-switch .icon-sun { opacity: 1; }
.theme-switch .icon-moon { opacity: 0.3; }
.theme-switch .switch-knob { transform: translateX(0); }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_light_when_unset() {
        let store = ThemeStore::open("test-theme-default");
        assert_eq!(store.setting(), ThemeSetting::Light);
        let _ = storage::clear_profile("test-theme-default");
    }

    #[test]
    fn double_toggle_restores_original() {
        let profile = "test-theme-toggle";
        let _ = storage::clear_profile(profile);

        let mut store = ThemeStore::open(profile);
        let original = store.setting();

        assert_eq!(store.toggle(), original.flipped());
        // First toggle is persisted
        let reopened = ThemeStore::open(profile);
        assert_eq!(reopened.setting(), original.flipped());

        assert_eq!(store.toggle(), original);
        let reopened = ThemeStore::open(profile);
        assert_eq!(reopened.setting(), original);

        let _ = storage::clear_profile(profile);
    }
}
