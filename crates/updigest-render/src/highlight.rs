//! Keyword highlighting over HTML-escaped text.

use regex::{Captures, Regex};
use updigest_core::KeywordGroup;

use crate::error::RenderError;
use crate::text::escape_html;

/// Wraps whole-word keyword matches in colored `<span>`s.
///
/// All groups are compiled into one alternation with a capture group per
/// keyword group, so a single pass decides each match. When two groups could
/// match at the same position, the group listed first wins. Inserted markup
/// is never scanned again.
#[derive(Debug, Clone)]
pub struct KeywordHighlighter {
    pattern: Option<Regex>,
    colors: Vec<String>,
}

impl KeywordHighlighter {
    /// # Errors
    ///
    /// Returns [`RenderError::Pattern`] if the combined keyword pattern does
    /// not compile (e.g. it exceeds the regex size limit).
    pub fn new(groups: &[KeywordGroup]) -> Result<Self, RenderError> {
        let mut branches = Vec::new();
        let mut colors = Vec::new();

        for group in groups {
            let words: Vec<String> = group
                .words
                .iter()
                .map(|w| w.trim())
                .filter(|w| !w.is_empty())
                .map(|w| regex::escape(&escape_html(w)))
                .collect();
            if words.is_empty() {
                continue;
            }
            branches.push(format!("({})", words.join("|")));
            colors.push(escape_html(&group.color));
        }

        let pattern = if branches.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"(?i)\b(?:{})\b", branches.join("|")))?)
        };

        Ok(Self { pattern, colors })
    }

    /// Escape `text` and highlight keyword occurrences.
    #[must_use]
    pub fn highlight(&self, text: &str) -> String {
        let escaped = escape_html(text);
        let Some(pattern) = &self.pattern else {
            return escaped;
        };

        pattern
            .replace_all(&escaped, |caps: &Captures<'_>| {
                let idx = (1..caps.len())
                    .find(|&i| caps.get(i).is_some())
                    .map_or(0, |i| i - 1);
                let color = self.colors.get(idx).map_or("", String::as_str);
                format!(
                    "<span style='background:{color};padding:1px 4px;border-radius:4px;'>{}</span>",
                    &caps[0]
                )
            })
            .into_owned()
    }
}
