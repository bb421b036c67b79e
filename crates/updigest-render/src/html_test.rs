use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
};

use super::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 11, 12, 0, 0).unwrap()
}

fn window() -> ReportWindow {
    ReportWindow::ending_at(now(), 31).unwrap()
}

fn renderer() -> ReportRenderer {
    ReportRenderer::new(&ReportRules::default(), Utc).expect("default rules compile")
}

fn update(company: &str, user: &str, days_ago: i64, body: &str) -> Update {
    let company_url = format!("https://acme.monday.com/boards/1/pulses/{company}");
    Update {
        company: company.to_string(),
        update_url: format!("{company_url}?update_id={days_ago}"),
        company_url,
        text: body.to_string(),
        created: now() - Duration::days(days_ago),
        user: user.to_string(),
        avatar: "https://example.com/avatar.png".to_string(),
    }
}

#[test]
fn renders_heading_with_window_dates() {
    let html = renderer().render(&[], &window());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Company updates – Apr 10 to May 11, 2025</title>"));
    assert!(html.contains("<h1>Company updates – Apr 10 to May 11, 2025</h1>"));
    assert!(html.ends_with("</body></html>"));
}

#[test]
fn empty_report_shows_no_updates_notice_and_no_company_blocks() {
    let html = renderer().render(&[], &window());
    assert!(html.contains("No updates this month."));
    assert!(!html.contains("lead-title"));
}

#[test]
fn single_update_scenario() {
    let updates = vec![update(
        "Acme",
        "Jo",
        5,
        "<p>Hi team</p><p>See the offer at https://x.com/a?utm_source=x&id=1</p>",
    )];
    let html = renderer().render(&updates, &window());

    assert!(html.contains(r#"<div class="lead-title">Acme</div>"#));
    assert!(html.contains("<b>Jo</b>"));
    assert!(html.contains(
        "<span style='background:#fff3bf;padding:1px 4px;border-radius:4px;'>offer</span>"
    ));
    assert!(html.contains(r#"<li><a href="https://x.com/a?id=1">https://x.com/a</a></li>"#));
    assert!(html.contains("06 May 2025 12:00"));
    assert!(html.contains(
        r#"<a class="button" href="https://acme.monday.com/boards/1/pulses/Acme?update_id=5">Open full update in Monday</a>"#
    ));
}

#[test]
fn updates_without_links_have_no_links_section() {
    let updates = vec![update("Acme", "Jo", 1, "<p>Nothing to click</p>")];
    let html = renderer().render(&updates, &window());
    assert!(!html.contains("Links:"));
}

#[test]
fn groups_by_company_in_first_appearance_order() {
    let updates = vec![
        update("Globex", "Kari", 1, "g1"),
        update("Acme", "Jo", 2, "a1"),
        update("Globex", "Ola", 3, "g2"),
    ];
    let html = renderer().render(&updates, &window());

    assert_eq!(html.matches(r#"<div class="lead-title">"#).count(), 2);
    let globex = html.find("lead-title\">Globex").unwrap();
    let acme = html.find("lead-title\">Acme").unwrap();
    assert!(globex < acme);

    let g1 = html.find(">g1<").unwrap();
    let g2 = html.find(">g2<").unwrap();
    assert!(globex < g1 && g1 < g2 && g2 < acme, "Globex updates stay together in order");
}

#[test]
fn group_by_company_preserves_relative_order() {
    let updates = vec![
        update("B", "x", 1, "1"),
        update("A", "x", 2, "2"),
        update("B", "x", 3, "3"),
        update("A", "x", 4, "4"),
    ];
    let groups = group_by_company(&updates);
    let shape: Vec<(&str, Vec<&str>)> = groups
        .iter()
        .map(|(name, members)| (*name, members.iter().map(|u| u.text.as_str()).collect()))
        .collect();
    assert_eq!(shape, vec![("B", vec!["1", "3"]), ("A", vec!["2", "4"])]);
}

#[test]
fn escapes_company_and_author_names() {
    let updates = vec![update("<script>", "A & B", 1, "hi")];
    let html = renderer().render(&updates, &window());
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("<b>A &amp; B</b>"));
    assert!(!html.contains("<script>"));
}

#[test]
fn body_is_escaped_and_truncated() {
    let body = (1..=20)
        .map(|i| format!("<p>line {i} &lt;b&gt;</p>"))
        .collect::<String>();
    let updates = vec![update("Acme", "Jo", 1, &body)];
    let html = renderer().render(&updates, &window());
    assert!(html.contains("line 14 &lt;b&gt;"));
    assert!(!html.contains("line 15"));
    assert!(html.contains("teksten er forkortet"));
}

#[test]
fn timestamps_use_display_offset() {
    let oslo = ReportRenderer::new(
        &ReportRules::default(),
        FixedOffset::east_opt(2 * 3600).unwrap(),
    )
    .unwrap();
    let html = oslo.render(&[update("Acme", "Jo", 5, "hi")], &window());
    assert!(html.contains("06 May 2025 14:00"));
}

/// Central European time zone for 2026: summer time (+02:00) until the
/// switch at 01:00 UTC on 25 October, standard time (+01:00) after it.
#[derive(Debug, Clone, Copy)]
struct CentralEurope2026;

impl CentralEurope2026 {
    fn switch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 25)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap()
    }

    fn summer() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn winter() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }
}

impl TimeZone for CentralEurope2026 {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        Self
    }

    fn offset_from_local_date(&self, _local: &NaiveDate) -> LocalResult<FixedOffset> {
        LocalResult::Single(Self::winter())
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        LocalResult::Single(self.offset_from_utc_datetime(&(*local - Duration::hours(1))))
    }

    fn offset_from_utc_date(&self, _utc: &NaiveDate) -> FixedOffset {
        Self::winter()
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        if *utc < Self::switch() {
            Self::summer()
        } else {
            Self::winter()
        }
    }
}

#[test]
fn timestamps_follow_daylight_saving_changes_inside_window() {
    let run_at = Utc.with_ymd_and_hms(2026, 11, 10, 12, 0, 0).unwrap();
    let window = ReportWindow::ending_at(run_at, 31).unwrap();
    let mut before = update("Acme", "Jo", 0, "before switch");
    before.created = Utc.with_ymd_and_hms(2026, 10, 20, 10, 0, 0).unwrap();
    let mut after = update("Acme", "Jo", 0, "after switch");
    after.created = Utc.with_ymd_and_hms(2026, 11, 5, 10, 0, 0).unwrap();

    let renderer = ReportRenderer::new(&ReportRules::default(), CentralEurope2026).unwrap();
    let html = renderer.render(&[after, before], &window);

    assert!(html.contains("20 Oct 2026 12:00"), "html: {html}");
    assert!(html.contains("05 Nov 2026 11:00"), "html: {html}");
}

#[test]
fn attr_url_encodes_quotes_and_brackets() {
    assert_eq!(
        attr_url(r#"https://x.com/a"b'c<d>"#),
        "https://x.com/a%22b%27c%3Cd%3E"
    );
}
