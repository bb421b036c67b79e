//! Link extraction and tracking-parameter removal.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

const TRACKING_PARAMS: [&str; 4] = ["fbclid", "gclid", "mc_cid", "mc_eid"];

fn is_tracking_param(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.starts_with("utm_") || TRACKING_PARAMS.contains(&lower.as_str())
}

/// Find every `http(s)://` URL in plain text, with tracking parameters
/// removed.
#[must_use]
pub fn extract_links(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .map(|m| strip_tracking_params(m.as_str()))
        .collect()
}

/// Remove `utm_*` and known click-id parameters from a URL's query string.
///
/// Other parameters keep their values and order. URLs that fail to parse,
/// have no query, or carry no tracking parameters come back unchanged.
#[must_use]
pub fn strip_tracking_params(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };
    if url.query().is_none() {
        return raw.to_string();
    }

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let kept: Vec<&(String, String)> = pairs
        .iter()
        .filter(|(name, _)| !is_tracking_param(name))
        .collect();

    if kept.len() == pairs.len() {
        return raw.to_string();
    }

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    url.to_string()
}

/// The URL up to its query string, used as the visible link label.
#[must_use]
pub fn display_label(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
