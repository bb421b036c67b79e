//! Plain-text extraction and truncation of update bodies.

use std::sync::LazyLock;

use regex::Regex;
use updigest_core::ReportRules;

use crate::error::RenderError;

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a[^>]+class="user_mention_editor[^"]*"[^>]*>(.*?)</a>"#)
        .expect("valid mention regex")
});
static IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img[^>]*>").expect("valid img regex"));
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(div|p|br|hr)[^>]*>").expect("valid block regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank-run regex"));

/// Escape text for insertion into HTML element content or quoted attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Cleans and truncates raw update bodies according to [`ReportRules`].
#[derive(Debug, Clone)]
pub struct TextCleaner {
    header_re: Option<Regex>,
    quote_marker: String,
    hidden_placeholder: String,
    shortened_placeholder: String,
}

impl TextCleaner {
    /// # Errors
    ///
    /// Returns [`RenderError::Pattern`] if the header-line pattern built from
    /// the configured prefixes does not compile.
    pub fn new(rules: &ReportRules) -> Result<Self, RenderError> {
        let prefixes: Vec<String> = rules
            .email_header_prefixes
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();

        let header_re = if prefixes.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?im)^(?:{}):.*$",
                prefixes.join("|")
            ))?)
        };

        Ok(Self {
            header_re,
            quote_marker: rules.quote_marker.to_lowercase(),
            hidden_placeholder: rules.hidden_placeholder.clone(),
            shortened_placeholder: rules.shortened_placeholder.clone(),
        })
    }

    /// Reduce an HTML update body to plain multi-line text.
    ///
    /// Mentions keep their display text, images vanish, block tags become
    /// line breaks, email envelope header lines are dropped, and runs of
    /// blank lines collapse to one.
    #[must_use]
    pub fn clean_update_text(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let text = MENTION_RE.replace_all(raw, "${1}");
        let text = IMG_RE.replace_all(&text, "");
        let text = BLOCK_RE.replace_all(&text, "\n");
        let text = TAG_RE.replace_all(&text, "");
        let mut text = html_escape::decode_html_entities(&text).into_owned();

        if let Some(re) = &self.header_re {
            text = re.replace_all(&text, "").into_owned();
        }

        let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
        text.trim().to_string()
    }

    /// Shorten cleaned text to at most `max_lines` non-empty lines.
    ///
    /// The second quoted-reply marker line ends the output with the
    /// "hidden" placeholder; hitting `max_lines` first ends it with the
    /// "shortened" placeholder. The result never exceeds `max_lines + 1`
    /// lines.
    #[must_use]
    pub fn truncate_update_text(&self, text: &str, max_lines: usize) -> String {
        let mut output: Vec<&str> = Vec::new();
        let mut quote_blocks_seen = 0usize;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line.to_lowercase().starts_with(&self.quote_marker) {
                quote_blocks_seen += 1;
                if quote_blocks_seen > 1 {
                    output.push(&self.hidden_placeholder);
                    break;
                }
            }

            output.push(line);

            if output.len() >= max_lines {
                output.push(&self.shortened_placeholder);
                break;
            }
        }

        output.join("\n")
    }
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
