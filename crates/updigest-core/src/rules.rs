use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const DEFAULT_MAX_LINES: usize = 14;
pub const DEFAULT_QUOTE_MARKER: &str = "fra:";
pub const DEFAULT_HIDDEN_PLACEHOLDER: &str = "\u{2014} tidligere e-postutveksling skjult \u{2014}";
pub const DEFAULT_SHORTENED_PLACEHOLDER: &str = "\u{2014} teksten er forkortet \u{2014}";

const DEFAULT_HEADER_PREFIXES: [&str; 8] =
    ["from", "fra", "sent", "sendt", "to", "til", "subject", "emne"];

/// A set of equivalent keywords (usually one per language) sharing a
/// highlight color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub color: String,
    pub words: Vec<String>,
}

impl KeywordGroup {
    fn new(name: &str, color: &str, words: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            words: words.iter().map(|w| (*w).to_string()).collect(),
        }
    }
}

/// Text rules applied while cleaning, truncating, and highlighting update
/// bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRules {
    /// Applied in order; earlier groups win on overlapping matches.
    pub keyword_groups: Vec<KeywordGroup>,
    /// Line prefixes (without the trailing colon) that mark email envelope
    /// headers.
    pub email_header_prefixes: Vec<String>,
    pub quote_marker: String,
    pub hidden_placeholder: String,
    pub shortened_placeholder: String,
    pub max_lines: usize,
}

impl Default for ReportRules {
    fn default() -> Self {
        Self {
            keyword_groups: vec![
                KeywordGroup::new("offer", "#fff3bf", &["offer", "tilbud"]),
                KeywordGroup::new("meeting", "#e3f2fd", &["meeting", "m\u{f8}te", "forhandling"]),
                KeywordGroup::new("price", "#e8f5e9", &["price", "pris", "kostnad"]),
                KeywordGroup::new("contract", "#fbe9e7", &["contract", "kontrakt", "avtale"]),
            ],
            email_header_prefixes: DEFAULT_HEADER_PREFIXES
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            quote_marker: DEFAULT_QUOTE_MARKER.to_string(),
            hidden_placeholder: DEFAULT_HIDDEN_PLACEHOLDER.to_string(),
            shortened_placeholder: DEFAULT_SHORTENED_PLACEHOLDER.to_string(),
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

/// On-disk shape of the rules YAML file. Omitted fields fall back to the
/// built-in defaults.
#[derive(Debug, Deserialize)]
pub struct RulesFile {
    pub keyword_groups: Vec<KeywordGroup>,
    #[serde(default)]
    pub email_header_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub quote_marker: Option<String>,
    #[serde(default)]
    pub hidden_placeholder: Option<String>,
    #[serde(default)]
    pub shortened_placeholder: Option<String>,
    #[serde(default)]
    pub max_lines: Option<usize>,
}

impl From<RulesFile> for ReportRules {
    fn from(file: RulesFile) -> Self {
        let defaults = ReportRules::default();
        Self {
            keyword_groups: file.keyword_groups,
            email_header_prefixes: file
                .email_header_prefixes
                .unwrap_or(defaults.email_header_prefixes),
            quote_marker: file.quote_marker.unwrap_or(defaults.quote_marker),
            hidden_placeholder: file
                .hidden_placeholder
                .unwrap_or(defaults.hidden_placeholder),
            shortened_placeholder: file
                .shortened_placeholder
                .unwrap_or(defaults.shortened_placeholder),
            max_lines: file.max_lines.unwrap_or(defaults.max_lines),
        }
    }
}

/// Load and validate report rules from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<ReportRules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_rules(&content)
}

/// Parse and validate report rules from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_rules(content: &str) -> Result<ReportRules, ConfigError> {
    let file: RulesFile = serde_yaml::from_str(content)?;
    let rules = ReportRules::from(file);
    validate_rules(&rules)?;
    Ok(rules)
}

fn validate_rules(rules: &ReportRules) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for group in &rules.keyword_groups {
        if group.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "keyword group name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(group.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate keyword group: '{}'",
                group.name
            )));
        }

        if group.color.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "keyword group '{}' has no color",
                group.name
            )));
        }

        if group.words.iter().all(|w| w.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "keyword group '{}' has no words",
                group.name
            )));
        }
    }

    if rules.max_lines == 0 {
        return Err(ConfigError::Validation(
            "max_lines must be at least 1".to_string(),
        ));
    }

    if rules.quote_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "quote_marker must be non-empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
