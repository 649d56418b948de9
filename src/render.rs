//! Inline message markup.
//!
//! Chat bubbles get a fixed set of textual substitutions, applied in a
//! deliberate order: line breaks and emphasis first, then code spans, then
//! URL linking, then mention tagging. Later passes must not re-process
//! markup produced by earlier ones (a URL inside bold text is linked before
//! mention scanning, so nothing gets double-wrapped).
//!
//! Substitution is purely textual, with no escaping beyond what the
//! replacements themselves produce. Delimiter-looking characters in the raw
//! text will be transformed even when unintended; that matches the widget's
//! documented behavior and is left as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleRole {
    User,
    Ai,
    Error,
}

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static UNDERLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static STRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s<]+").unwrap());
static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|[\s>])@(\w+)").unwrap());

/// Expands the widget's inline markup into an HTML fragment.
pub fn render_markup(text: &str) -> String {
    let out = text.replace('\n', "<br>");
    let out = BOLD.replace_all(&out, "<strong>${1}</strong>");
    let out = ITALIC.replace_all(&out, "<em>${1}</em>");
    let out = UNDERLINE.replace_all(&out, "<u>${1}</u>");
    let out = STRIKE.replace_all(&out, "<del>${1}</del>");
    let out = CODE.replace_all(&out, "<code>${1}</code>");
    let out = URL.replace_all(
        &out,
        r#"<a href="$0" target="_blank" rel="noopener noreferrer">$0</a>"#,
    );
    let out = MENTION.replace_all(&out, r#"${1}<span class="mention">@${2}</span>"#);
    out.into_owned()
}

/// Avatar glyph for a bubble; the error role carries none.
pub fn avatar_glyph(role: BubbleRole) -> Option<&'static str> {
    match role {
        BubbleRole::User => Some("U"),
        BubbleRole::Ai => Some("P"),
        BubbleRole::Error => None,
    }
}

const BUBBLE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// 12-hour local-time label for a turn's RFC 3339 timestamp. Unparseable
/// timestamps simply get no label.
pub fn timestamp_label(rfc3339: &str) -> Option<String> {
    let mut datetime = OffsetDateTime::parse(rfc3339, &Rfc3339).ok()?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(BUBBLE_TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_emphasis_mention_and_url_without_double_wrapping() {
        let html = render_markup("**hi** @bob https://x.com");
        assert_eq!(
            html,
            "<strong>hi</strong> <span class=\"mention\">@bob</span> \
             <a href=\"https://x.com\" target=\"_blank\" rel=\"noopener noreferrer\">https://x.com</a>"
        );
    }

    #[test]
    fn expands_line_breaks_before_other_passes() {
        assert_eq!(render_markup("a\nb"), "a<br>b");
        // A URL at end of line must not swallow the break marker
        assert_eq!(
            render_markup("see https://x.com\nok"),
            "see <a href=\"https://x.com\" target=\"_blank\" rel=\"noopener noreferrer\">https://x.com</a><br>ok"
        );
    }

    #[test]
    fn expands_each_inline_marker() {
        assert_eq!(render_markup("*hey*"), "<em>hey</em>");
        assert_eq!(render_markup("__u__"), "<u>u</u>");
        assert_eq!(render_markup("~~gone~~"), "<del>gone</del>");
        assert_eq!(render_markup("`let x`"), "<code>let x</code>");
    }

    #[test]
    fn bold_consumes_asterisks_before_italic() {
        assert_eq!(
            render_markup("**a** and *b*"),
            "<strong>a</strong> and <em>b</em>"
        );
    }

    #[test]
    fn mention_requires_token_boundary() {
        let html = render_markup("mail me a@b.com");
        // mid-word @ is left alone
        assert_eq!(html, "mail me a@b.com");

        let html = render_markup("@alice hey");
        assert_eq!(html, "<span class=\"mention\">@alice</span> hey");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render_markup("just words"), "just words");
    }

    #[test]
    fn avatar_glyphs_by_role() {
        assert_eq!(avatar_glyph(BubbleRole::User), Some("U"));
        assert_eq!(avatar_glyph(BubbleRole::Ai), Some("P"));
        assert_eq!(avatar_glyph(BubbleRole::Error), None);
    }

    #[test]
    fn timestamp_label_parses_rfc3339() {
        let label = timestamp_label("2024-03-01T15:04:05Z").expect("should parse");
        assert!(label.ends_with("AM") || label.ends_with("PM"));
        assert!(timestamp_label("not a timestamp").is_none());
    }
}
