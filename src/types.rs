use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One exchange unit in the chat history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub message: String,
    /// RFC 3339, recorded when the turn was created.
    pub timestamp: String,
}

impl ChatTurn {
    pub fn now(sender: Sender, message: impl Into<String>) -> Self {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        Self {
            sender,
            message: message.into(),
            timestamp,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    #[default]
    Light,
    Dark,
}

impl ThemeSetting {
    pub fn flipped(self) -> Self {
        match self {
            ThemeSetting::Light => ThemeSetting::Dark,
            ThemeSetting::Dark => ThemeSetting::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeSetting::Light => "light",
            ThemeSetting::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemeSetting::Light),
            "dark" => Some(ThemeSetting::Dark),
            _ => None,
        }
    }
}
