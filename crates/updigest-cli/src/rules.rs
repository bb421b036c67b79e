use std::path::Path;

use anyhow::Context;
use updigest_core::ReportRules;

/// Load the rules file at `path`, or the built-in rules when no path is set.
pub(crate) fn load_report_rules(path: Option<&Path>) -> anyhow::Result<ReportRules> {
    match path {
        Some(path) => {
            let rules = updigest_core::load_rules(path)
                .with_context(|| format!("loading rules from {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                groups = rules.keyword_groups.len(),
                "loaded report rules"
            );
            Ok(rules)
        }
        None => Ok(ReportRules::default()),
    }
}

/// Human-readable listing for `updigest rules`.
pub(crate) fn format_rules(rules: &ReportRules) -> String {
    let mut lines: Vec<String> = rules
        .keyword_groups
        .iter()
        .map(|group| format!("{} ({}): {}", group.name, group.color, group.words.join(", ")))
        .collect();
    lines.push(format!(
        "email header prefixes: {}",
        rules.email_header_prefixes.join(", ")
    ));
    lines.push(format!("quote marker: {}", rules.quote_marker));
    lines.push(format!("max lines: {}", rules.max_lines));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
