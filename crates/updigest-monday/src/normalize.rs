//! Flattening of board items into [`Update`] records for the report window.

use chrono::{DateTime, Utc};
use updigest_core::{ReportWindow, Update};

use crate::types::BoardItem;

const UNKNOWN_USER: &str = "Unknown";

/// Context needed to turn raw board items into [`Update`]s.
#[derive(Debug, Clone)]
pub struct ExtractOptions<'a> {
    /// Team URL without trailing slash, e.g. `https://acme.monday.com`.
    pub team_url: &'a str,
    pub board_id: u64,
    pub default_avatar: &'a str,
    pub window: ReportWindow,
}

/// Parses a monday.com `created_at` timestamp.
///
/// Returns `None` if the string is not RFC 3339 (`Z` or numeric offset,
/// optional fractional seconds).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Flattens items → updates, keeps those inside the window, and sorts the
/// result newest first.
///
/// Updates with a missing or unparseable timestamp are skipped.
#[must_use]
pub fn extract_updates(items: &[BoardItem], opts: &ExtractOptions<'_>) -> Vec<Update> {
    let mut updates = Vec::new();

    for item in items {
        let company_url = format!(
            "{}/boards/{}/pulses/{}",
            opts.team_url, opts.board_id, item.id
        );

        for raw in item.updates.iter().flatten() {
            let Some(created) = raw.created_at.as_deref().and_then(parse_timestamp) else {
                tracing::debug!(
                    item_id = %item.id,
                    update_id = %raw.id,
                    "skipping update \u{2014} unparseable created_at"
                );
                continue;
            };

            if !opts.window.contains(created) {
                continue;
            }

            let creator = raw.creator.as_ref();
            let user = creator
                .and_then(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_USER.to_string());
            let avatar = creator
                .and_then(|c| c.photo_small.clone())
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| opts.default_avatar.to_string());

            updates.push(Update {
                company: item.name.clone(),
                company_url: company_url.clone(),
                update_url: format!("{company_url}?update_id={}", raw.id),
                text: raw.body.clone().unwrap_or_default(),
                created,
                user,
                avatar,
            });
        }
    }

    updates.sort_by(|a, b| b.created.cmp(&a.created));
    updates
}
