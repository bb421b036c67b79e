//! Composition of the full HTML report.

use std::fmt::Display;

use chrono::{TimeZone, Utc};
use updigest_core::{ReportRules, ReportWindow, Update};

use crate::activity::ActivitySummary;
use crate::error::RenderError;
use crate::highlight::KeywordHighlighter;
use crate::links::{display_label, extract_links};
use crate::text::{escape_html, TextCleaner};

const STYLE: &str = r"
@page {
  size: A4 portrait;
  margin: 20mm;
}

body {
  font-family: Arial, sans-serif;
  max-width: 700px;
  margin: 0 auto;
}

.lead {
  border:1px solid #ddd;
  border-radius:8px;
  padding:12px;
  margin-bottom:16px;
  break-inside: avoid;
}

.lead-title {
  font-size:16px;
  font-weight:700;
}

.owner-line {
  display:flex;
  align-items:center;
  margin-top:6px;
  font-size:13px;
}

.avatar {
  width:26px;
  height:26px;
  border-radius:50%;
  margin-right:8px;
}

.meta {
  font-size:13px;
  margin-top:6px;
  white-space:pre-wrap;
  overflow-wrap:anywhere;
  word-break:break-word;
}

.button {
  display:inline-block;
  margin-top:8px;
  padding:6px 10px;
  font-size:12px;
  border-radius:6px;
  background:#0a4b8f;
  color:#fff;
  text-decoration:none;
}

a {
  color:#0a4b8f;
  text-decoration:none;
}
";

/// Renders the monthly report document.
///
/// Compiles the cleaning and highlighting patterns once so they can be
/// reused for every update. Timestamps are shown in `Tz`, resolving the
/// offset per update so daylight-saving changes inside the window are
/// respected.
#[derive(Debug, Clone)]
pub struct ReportRenderer<Tz: TimeZone = Utc> {
    cleaner: TextCleaner,
    highlighter: KeywordHighlighter,
    max_lines: usize,
    tz: Tz,
}

impl<Tz> ReportRenderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// `tz` is the time zone used for update timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Pattern`] if the rules produce an invalid
    /// pattern.
    pub fn new(rules: &ReportRules, tz: Tz) -> Result<Self, RenderError> {
        Ok(Self {
            cleaner: TextCleaner::new(rules)?,
            highlighter: KeywordHighlighter::new(&rules.keyword_groups)?,
            max_lines: rules.max_lines,
            tz,
        })
    }

    /// Render `updates` (already filtered to `window` and sorted newest
    /// first) into a standalone HTML document.
    #[must_use]
    pub fn render(&self, updates: &[Update], window: &ReportWindow) -> String {
        let heading = escape_html(&window.heading());
        let activity = ActivitySummary::from_updates(updates).render_html();

        let mut html = format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{heading}</title>
<style>{STYLE}</style>
</head>

<body>

<h1>{heading}</h1>

<div class="lead">
  <b>User activity</b>
  {activity}
</div>
"#
        );

        for (company, group) in group_by_company(updates) {
            html.push_str(&format!(
                r#"
<div class="lead">
  <div class="lead-title">{}</div>
"#,
                escape_html(company)
            ));
            for update in group {
                html.push_str(&self.render_update(update));
            }
            html.push_str("</div>\n");
        }

        html.push_str("</body></html>");
        html
    }

    fn render_update(&self, update: &Update) -> String {
        let cleaned = self.cleaner.clean_update_text(&update.text);
        let truncated = self.cleaner.truncate_update_text(&cleaned, self.max_lines);
        let highlighted = self.highlighter.highlight(&truncated);
        let links_html = render_links(&extract_links(&cleaned));
        let created = update
            .created
            .with_timezone(&self.tz)
            .format("%d %b %Y %H:%M");

        format!(
            r#"
  <div class="owner-line">
    <img src="{avatar}" class="avatar">
    <b>{user}</b>
    <span style="margin-left:8px;color:#777;">{created}</span>
  </div>

  <div class="meta">{highlighted}</div>
  {links_html}

  <a class="button" href="{update_url}">Open full update in Monday</a>
"#,
            avatar = attr_url(&update.avatar),
            user = escape_html(&update.user),
            update_url = attr_url(&update.update_url),
        )
    }
}

/// Partition updates by company, in order of first appearance. Relative
/// order inside each group follows the input order.
fn group_by_company(updates: &[Update]) -> Vec<(&str, Vec<&Update>)> {
    let mut groups: Vec<(&str, Vec<&Update>)> = Vec::new();
    for update in updates {
        match groups.iter_mut().find(|(name, _)| *name == update.company) {
            Some((_, members)) => members.push(update),
            None => groups.push((update.company.as_str(), vec![update])),
        }
    }
    groups
}

fn render_links(links: &[String]) -> String {
    if links.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class='meta'><b>Links:</b><ul>");
    for link in links {
        html.push_str(&format!(
            r#"<li><a href="{}">{}</a></li>"#,
            attr_url(link),
            escape_html(display_label(link))
        ));
    }
    html.push_str("</ul></div>");
    html
}

/// URLs go into attributes verbatim apart from quotes and angle brackets,
/// which are percent-encoded.
fn attr_url(url: &str) -> String {
    url.replace('"', "%22")
        .replace('\'', "%27")
        .replace('<', "%3C")
        .replace('>', "%3E")
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
