//! Per-author activity summary ("heatmap").

use updigest_core::Update;

use crate::text::escape_html;

/// Update count at which the indicator reaches full opacity.
const FULL_OPACITY_COUNT: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub user: String,
    pub count: usize,
}

/// Update counts per author, most active first.
#[derive(Debug, Clone, Default)]
pub struct ActivitySummary {
    entries: Vec<ActivityEntry>,
}

/// Indicator opacity for `count` updates: `min(1.0, count / 12)`.
#[must_use]
pub fn opacity(count: usize) -> f64 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    (f64::from(count) / f64::from(FULL_OPACITY_COUNT)).min(1.0)
}

impl ActivitySummary {
    /// Count updates per author. Ties keep first-seen order.
    #[must_use]
    pub fn from_updates(updates: &[Update]) -> Self {
        let mut entries: Vec<ActivityEntry> = Vec::new();
        for update in updates {
            match entries.iter_mut().find(|e| e.user == update.user) {
                Some(entry) => entry.count += 1,
                None => entries.push(ActivityEntry {
                    user: update.user.clone(),
                    count: 1,
                }),
            }
        }
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the summary block body.
    #[must_use]
    pub fn render_html(&self) -> String {
        if self.entries.is_empty() {
            return "<div style='color:#777;'>No updates this month.</div>".to_string();
        }

        let mut html = String::from("<div style='margin-top:6px;'>");
        for entry in &self.entries {
            html.push_str(&format!(
                r#"
<div style="margin:4px 0;font-size:13px;">
  <span style="display:inline-block;width:10px;height:10px;border-radius:50%;background:rgba(46,125,50,{opacity:.3});margin-right:6px;"></span>
  {user} &mdash; {count}
</div>
"#,
                opacity = opacity(entry.count),
                user = escape_html(&entry.user),
                count = entry.count,
            ));
        }
        html.push_str("</div>");
        html
    }
}
