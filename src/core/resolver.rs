use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Coordinates, MatchRule, ResolvedLocation};

/// Hosts whose links only carry an opaque token
pub const DEFAULT_SHORT_LINK_HOSTS: [&str; 2] = ["goo.gl/maps", "maps.app.goo.gl"];

static AT_COORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)").expect("valid regex"));
static LL_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]ll=(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)").expect("valid regex"));
static Q_COORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]q=(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)").expect("valid regex"));
static PLACE_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/place/[^/]*/@(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)").expect("valid regex"));
static DIR_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/dir/[^/]*/@(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)").expect("valid regex"));
static PLACE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/place/([^/?@]+)").expect("valid regex"));
static Q_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]q=([^&@]+)").expect("valid regex"));
static BARE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+\.?[0-9]*,-?[0-9]+\.?[0-9]*$").expect("valid regex"));

type MatchFn = fn(&LocationResolver, &str) -> Option<ResolvedLocation>;

/// Rules in evaluation order; the first hit wins
const CASCADE: [(MatchRule, MatchFn); 8] = [
    (MatchRule::ShortLinkHost, LocationResolver::match_short_link),
    (MatchRule::AtCoordinates, LocationResolver::match_at_coordinates),
    (MatchRule::LlParameter, LocationResolver::match_ll_parameter),
    (MatchRule::QueryCoordinates, LocationResolver::match_query_coordinates),
    (MatchRule::PlaceWithCoordinates, LocationResolver::match_place_coordinates),
    (MatchRule::DirectionsWithCoordinates, LocationResolver::match_directions_coordinates),
    (MatchRule::PlaceName, LocationResolver::match_place_name),
    (MatchRule::SearchQuery, LocationResolver::match_search_query),
];

/// Classifies pasted map links into something renderable
///
/// # Cascade
/// 1. Known shortener host -> `ShortLink`
/// 2. `@lat,lng` anywhere
/// 3. `ll=lat,lng`
/// 4. `q=lat,lng`
/// 5. `/place/<name>/@lat,lng`
/// 6. `/dir/<dest>/@lat,lng`
/// 7. `/place/<name>` -> `PlaceQuery`
/// 8. `q=<text>` -> `PlaceQuery`
///
/// Anything else is `Unresolved`. No network I/O, never fails.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    short_link_hosts: Vec<String>,
}

impl LocationResolver {
    pub fn new(short_link_hosts: Vec<String>) -> Self {
        Self { short_link_hosts }
    }

    pub fn with_default_hosts() -> Self {
        Self::new(DEFAULT_SHORT_LINK_HOSTS.iter().map(|h| h.to_string()).collect())
    }

    pub fn short_link_hosts(&self) -> &[String] {
        &self.short_link_hosts
    }

    /// Classify a location URL
    pub fn resolve(&self, url: &str) -> ResolvedLocation {
        self.resolve_with_rule(url).0
    }

    /// Classify a location URL, reporting which rule matched
    pub fn resolve_with_rule(&self, url: &str) -> (ResolvedLocation, Option<MatchRule>) {
        if url.trim().is_empty() {
            return (ResolvedLocation::Unresolved, None);
        }

        let decoded = decode_or_raw(url);

        for (rule, matcher) in CASCADE {
            if let Some(location) = matcher(self, &decoded) {
                match &location {
                    ResolvedLocation::ShortLink => {
                        tracing::warn!("Short URL detected, cannot parse coordinates directly: {}", url);
                    }
                    _ => tracing::debug!("Resolved {} using {}", url, rule.describe()),
                }
                return (location, Some(rule));
            }
        }

        tracing::warn!("Could not extract coordinates from URL: {}", url);
        (ResolvedLocation::Unresolved, None)
    }

    fn match_short_link(&self, url: &str) -> Option<ResolvedLocation> {
        self.short_link_hosts
            .iter()
            .any(|host| url.contains(host.as_str()))
            .then_some(ResolvedLocation::ShortLink)
    }

    fn match_at_coordinates(&self, url: &str) -> Option<ResolvedLocation> {
        capture_coordinates(&AT_COORDS, url)
    }

    fn match_ll_parameter(&self, url: &str) -> Option<ResolvedLocation> {
        capture_coordinates(&LL_PARAM, url)
    }

    fn match_query_coordinates(&self, url: &str) -> Option<ResolvedLocation> {
        capture_coordinates(&Q_COORDS, url)
    }

    fn match_place_coordinates(&self, url: &str) -> Option<ResolvedLocation> {
        capture_coordinates(&PLACE_AT, url)
    }

    fn match_directions_coordinates(&self, url: &str) -> Option<ResolvedLocation> {
        capture_coordinates(&DIR_AT, url)
    }

    fn match_place_name(&self, url: &str) -> Option<ResolvedLocation> {
        let name = PLACE_NAME.captures(url)?.get(1)?.as_str();
        place_query(name)
    }

    fn match_search_query(&self, url: &str) -> Option<ResolvedLocation> {
        let text = Q_TEXT.captures(url)?.get(1)?.as_str();
        if BARE_PAIR.is_match(text) {
            return None;
        }
        place_query(text)
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::with_default_hosts()
    }
}

/// Percent-decode without `+` handling, keeping the raw text on failure
fn decode_or_raw(url: &str) -> Cow<'_, str> {
    match urlencoding::decode(url) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!("Could not percent-decode {}: {}", url, e);
            Cow::Borrowed(url)
        }
    }
}

/// Normalize a captured name: `+` becomes a space, then one more decode pass
pub(crate) fn normalize_name(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

fn place_query(raw: &str) -> Option<ResolvedLocation> {
    let place_name = normalize_name(raw);
    if place_name.trim().is_empty() {
        return None;
    }
    Some(ResolvedLocation::PlaceQuery { place_name })
}

fn capture_coordinates(pattern: &Regex, url: &str) -> Option<ResolvedLocation> {
    let caps = pattern.captures(url)?;
    let lat = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let lng = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some(ResolvedLocation::Coordinates(Coordinates::new(lat, lng)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(url: &str) -> ResolvedLocation {
        LocationResolver::with_default_hosts().resolve(url)
    }

    #[test]
    fn test_at_format() {
        let url = "https://www.google.com/maps/@22.1604222,-100.9988385,17z";
        assert_eq!(
            resolve(url),
            ResolvedLocation::Coordinates(Coordinates::new(22.1604222, -100.9988385))
        );
    }

    #[test]
    fn test_ll_parameter() {
        let (location, rule) = LocationResolver::default()
            .resolve_with_rule("https://maps.google.com/maps?ll=40.7128,-74.006&z=12");
        assert_eq!(location.coordinates(), Some(Coordinates::new(40.7128, -74.006)));
        assert_eq!(rule, Some(MatchRule::LlParameter));
    }

    #[test]
    fn test_numeric_q_parameter() {
        let (location, rule) =
            LocationResolver::default().resolve_with_rule("https://maps.google.com/maps?q=-33.86,151.2");
        assert_eq!(location.coordinates(), Some(Coordinates::new(-33.86, 151.2)));
        assert_eq!(rule, Some(MatchRule::QueryCoordinates));
    }

    #[test]
    fn test_trailing_dot_number_parses() {
        assert_eq!(
            resolve("https://maps.google.com/@12.,34"),
            ResolvedLocation::Coordinates(Coordinates::new(12.0, 34.0))
        );
    }

    #[test]
    fn test_place_name_without_coordinates() {
        assert_eq!(
            resolve("https://www.google.com/maps/place/Hell+Fire+Club"),
            ResolvedLocation::PlaceQuery {
                place_name: "Hell Fire Club".to_string()
            }
        );
    }

    #[test]
    fn test_place_name_stops_at_query() {
        assert_eq!(
            resolve("https://www.google.com/maps/place/Bristol+Pub?entry=ttu"),
            ResolvedLocation::PlaceQuery {
                place_name: "Bristol Pub".to_string()
            }
        );
    }

    #[test]
    fn test_encoded_url_is_decoded_first() {
        let url = "https%3A%2F%2Fmaps.google.com%2Fmaps%3Fq%3D10.5%2C20.25";
        assert_eq!(
            resolve(url),
            ResolvedLocation::Coordinates(Coordinates::new(10.5, 20.25))
        );
    }

    #[test]
    fn test_double_encoded_place_name() {
        // %2520 decodes to %20 on the first pass and to a space on the second
        assert_eq!(
            resolve("https://www.google.com/maps/place/Caf%25C3%25A9%2520Roma"),
            ResolvedLocation::PlaceQuery {
                place_name: "Café Roma".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_raw() {
        assert_eq!(
            resolve("https://maps.google.com/maps?q=caf%FF"),
            ResolvedLocation::PlaceQuery {
                place_name: "caf%FF".to_string()
            }
        );
    }

    #[test]
    fn test_only_ascii_digits_are_coordinates() {
        assert_eq!(resolve("https://maps.google.com/@١٢,٣٤"), ResolvedLocation::Unresolved);
        assert_eq!(
            resolve("https://maps.google.com/@1,2\u{0663}"),
            ResolvedLocation::Coordinates(Coordinates::new(1.0, 2.0))
        );
    }

    #[test]
    fn test_directions_matcher() {
        let resolver = LocationResolver::default();
        assert_eq!(
            resolver.match_directions_coordinates("https://www.google.com/maps/dir/Home/@22.1,-100.9,15z"),
            Some(ResolvedLocation::Coordinates(Coordinates::new(22.1, -100.9)))
        );
        assert_eq!(resolver.match_directions_coordinates("https://www.google.com/maps/@22.1,-100.9"), None);
    }

    #[test]
    fn test_cascade_order() {
        let rules: Vec<MatchRule> = CASCADE.iter().map(|(rule, _)| *rule).collect();
        assert_eq!(
            rules,
            vec![
                MatchRule::ShortLinkHost,
                MatchRule::AtCoordinates,
                MatchRule::LlParameter,
                MatchRule::QueryCoordinates,
                MatchRule::PlaceWithCoordinates,
                MatchRule::DirectionsWithCoordinates,
                MatchRule::PlaceName,
                MatchRule::SearchQuery,
            ]
        );
    }

    #[test]
    fn test_whitespace_is_unresolved() {
        assert_eq!(resolve("   "), ResolvedLocation::Unresolved);
    }

    #[test]
    fn test_custom_short_hosts() {
        let resolver = LocationResolver::new(vec!["bit.ly".to_string()]);
        assert_eq!(resolver.resolve("https://bit.ly/abc"), ResolvedLocation::ShortLink);
        assert_eq!(
            resolver.resolve("https://maps.app.goo.gl/xyz"),
            ResolvedLocation::Unresolved
        );
    }
}
