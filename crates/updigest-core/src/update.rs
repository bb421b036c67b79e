use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// One update posted on a company item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub company: String,
    pub company_url: String,
    /// `company_url` plus the `update_id` query parameter.
    pub update_url: String,
    /// Raw body as returned by the API, usually HTML.
    pub text: String,
    pub created: DateTime<Utc>,
    pub user: String,
    pub avatar: String,
}

/// Longest accepted report window, roughly ten years.
pub const MAX_LOOKBACK_DAYS: i64 = 3660;

/// The rolling reporting window. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// The window of `days` days ending at `now`, or `None` when the start
    /// falls outside the representable date range.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>, days: i64) -> Option<Self> {
        let start = now.checked_sub_signed(TimeDelta::try_days(days)?)?;
        Some(Self { start, end: now })
    }

    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Report heading, e.g. `Company updates – Apr 10 to May 11, 2025`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!(
            "Company updates \u{2013} {} to {}",
            self.start.format("%b %d"),
            self.end.format("%b %d, %Y")
        )
    }

    #[must_use]
    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.heading())
    }
}
