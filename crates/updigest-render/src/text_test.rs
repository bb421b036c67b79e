use updigest_core::rules::{DEFAULT_HIDDEN_PLACEHOLDER, DEFAULT_SHORTENED_PLACEHOLDER};

use super::*;

fn cleaner() -> TextCleaner {
    TextCleaner::new(&ReportRules::default()).expect("default rules compile")
}

#[test]
fn escape_html_escapes_all_special_characters() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
    );
}

#[test]
fn clean_decodes_full_named_entity_table() {
    assert_eq!(
        cleaner().clean_update_text(
            "<p>Caf&eacute; gar&ccedil;on 2&times;3 &rarr; &oacute;k R&amp;D</p>"
        ),
        "Café garçon 2×3 → ók R&D"
    );
}

#[test]
fn clean_decodes_numeric_references_and_keeps_bare_ampersands() {
    assert_eq!(
        cleaner().clean_update_text("&#65;&#x42; m&oslash;te &amp; more & less"),
        "AB møte & more & less"
    );
}

#[test]
fn clean_empty_input_is_empty() {
    assert_eq!(cleaner().clean_update_text(""), "");
}

#[test]
fn clean_unwraps_mentions() {
    let raw = r#"<p>Hi <a href="https://x.monday.com/users/1" class="user_mention_editor router" data-mention-id="1">@Kari</a>, see below</p>"#;
    assert_eq!(cleaner().clean_update_text(raw), "Hi @Kari, see below");
}

#[test]
fn clean_removes_images_and_breaks_blocks() {
    let raw = r#"<div>First line<br>Second line</div><img src="x.png"><p>Third</p>"#;
    assert_eq!(
        cleaner().clean_update_text(raw),
        "First line\nSecond line\n\nThird"
    );
}

#[test]
fn clean_strips_other_tags_and_decodes_entities() {
    let raw = "<p><strong>Pris</strong> &amp; <em>tilbud</em> &lt;snart&gt;</p>";
    assert_eq!(cleaner().clean_update_text(raw), "Pris & tilbud <snart>");
}

#[test]
fn clean_drops_email_header_lines_in_both_languages() {
    let raw = "Thanks!\nFrom: Ola <ola@example.com>\nSENDT: mandag\nTil: Kari\nEmne: Avtale\nsubject: deal\nReal content";
    let cleaned = cleaner().clean_update_text(raw);
    assert_eq!(cleaned, "Thanks!\n\nReal content");
}

#[test]
fn clean_keeps_lines_that_only_contain_header_words() {
    let raw = "Send the offer to Kari\nFromage: no";
    assert_eq!(cleaner().clean_update_text(raw), raw);
}

#[test]
fn clean_collapses_blank_runs() {
    let raw = "<p>a</p><p></p><p></p><p></p><p>b</p>";
    assert_eq!(cleaner().clean_update_text(raw), "a\n\nb");
}

#[test]
fn clean_is_idempotent_on_plain_text() {
    let c = cleaner();
    let plain = "Hei team\n\nMøte neste uke om pris.\nhttps://x.com/a?id=1";
    let once = c.clean_update_text(plain);
    assert_eq!(c.clean_update_text(&once), once);
}

#[test]
fn clean_without_header_prefixes_keeps_header_lines() {
    let rules = ReportRules {
        email_header_prefixes: vec![],
        ..ReportRules::default()
    };
    let c = TextCleaner::new(&rules).unwrap();
    assert_eq!(c.clean_update_text("From: Ola"), "From: Ola");
}

#[test]
fn truncate_short_text_is_unchanged_apart_from_blank_lines() {
    let text = "one\n\n  two  \nthree";
    assert_eq!(cleaner().truncate_update_text(text, 14), "one\ntwo\nthree");
}

#[test]
fn truncate_caps_lines_and_appends_shortened_placeholder() {
    let text = (1..=20).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let out = cleaner().truncate_update_text(&text, 14);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[13], "line 14");
    assert_eq!(lines[14], DEFAULT_SHORTENED_PLACEHOLDER);
}

#[test]
fn truncate_exactly_max_lines_still_appends_placeholder() {
    let text = "a\nb\nc";
    let out = cleaner().truncate_update_text(text, 3);
    assert_eq!(out, format!("a\nb\nc\n{DEFAULT_SHORTENED_PLACEHOLDER}"));
}

#[test]
fn truncate_hides_second_quoted_block() {
    let text = "Reply text\n  Fra: Ola\nquoted one\n FRA: Kari\nquoted two\nmore";
    let out = cleaner().truncate_update_text(text, 14);
    assert_eq!(
        out,
        format!("Reply text\nFra: Ola\nquoted one\n{DEFAULT_HIDDEN_PLACEHOLDER}")
    );
}

#[test]
fn truncate_single_quoted_block_is_kept() {
    let text = "Reply\nfra: Ola\nquoted";
    assert_eq!(cleaner().truncate_update_text(text, 14), text);
}

#[test]
fn truncate_never_exceeds_max_plus_one() {
    let c = cleaner();
    let text = (0..50)
        .map(|i| if i % 7 == 0 { "fra: x".to_string() } else { format!("l{i}") })
        .collect::<Vec<_>>()
        .join("\n");
    for max in 1..20 {
        assert!(c.truncate_update_text(&text, max).lines().count() <= max + 1);
    }
}
