use std::sync::LazyLock;

use regex::Regex;

use crate::core::resolver::normalize_name;

static PLACE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"place/([^/?#]+)").expect("valid regex"));
static FTID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ftid=([^&#]+)").expect("valid regex"));

/// Extract a human-readable label for a location URL
///
/// Looks at the `place/<id>` segment first, then an `ftid=<id>` parameter.
/// Runs on the raw URL, independent of how coordinates were resolved.
pub fn extract_place_label(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let raw = PLACE_SEGMENT
        .captures(url)
        .or_else(|| FTID_PARAM.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())?;

    let label = normalize_name(raw);
    if label.trim().is_empty() {
        None
    } else {
        Some(label)
    }
}
