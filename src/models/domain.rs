use serde::{Deserialize, Serialize};

/// A URL pasted by a poll creator into an option's location field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery(pub String);

impl LocationQuery {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only emptiness is checked; everything else is best-effort
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for LocationQuery {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Classification of a location URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedLocation {
    /// Precise position, can be rendered as a map directly
    Coordinates(Coordinates),
    /// Only a place name is known; geocoding is left to the map service
    PlaceQuery {
        #[serde(rename = "placeName")]
        place_name: String,
    },
    /// Shortened link that cannot be expanded without a network round-trip
    ShortLink,
    /// No pattern matched
    Unresolved,
}

impl ResolvedLocation {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            ResolvedLocation::Coordinates(coords) => Some(*coords),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, ResolvedLocation::Unresolved)
    }
}

/// Rule of the resolver cascade that produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    ShortLinkHost,
    AtCoordinates,
    LlParameter,
    QueryCoordinates,
    PlaceWithCoordinates,
    DirectionsWithCoordinates,
    PlaceName,
    SearchQuery,
}

impl MatchRule {
    pub fn describe(&self) -> &'static str {
        match self {
            MatchRule::ShortLinkHost => "short URL host",
            MatchRule::AtCoordinates => "@ format",
            MatchRule::LlParameter => "ll= format",
            MatchRule::QueryCoordinates => "q= format",
            MatchRule::PlaceWithCoordinates => "place format",
            MatchRule::DirectionsWithCoordinates => "directions format",
            MatchRule::PlaceName => "place name",
            MatchRule::SearchQuery => "search query",
        }
    }
}

/// Option card on the voting view, as carried by `data-value` and `.option-text`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingOption {
    pub value: String,
    pub text: String,
}

impl VotingOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Currently highlighted option for one page view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteSelection(Option<String>);

impl VoteSelection {
    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Replace the selection, returning the previously selected value
    pub fn replace(&mut self, value: String) -> Option<String> {
        self.0.replace(value)
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Which map widget a placeholder element hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    /// `.option-map` on the voting view, `map<N>`
    OptionMap,
    /// `.mini-map` on the management view, `miniMap<N>`
    MiniMap,
}

/// Map container element awaiting a widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPlaceholder {
    #[serde(rename = "elementId")]
    pub element_id: String,
    pub kind: PlaceholderKind,
    #[serde(default)]
    pub location: Option<String>,
}

impl MapPlaceholder {
    pub fn option_map(index: usize, location: impl Into<String>) -> Self {
        Self {
            element_id: format!("map{}", index),
            kind: PlaceholderKind::OptionMap,
            location: Some(location.into()),
        }
    }

    pub fn mini_map(index: usize) -> Self {
        Self {
            element_id: format!("miniMap{}", index),
            kind: PlaceholderKind::MiniMap,
            location: None,
        }
    }

    /// Id of the voting map a mini map mirrors (`miniMap3` -> `map3`)
    pub fn paired_map_id(&self) -> Option<String> {
        match self.kind {
            PlaceholderKind::MiniMap => self
                .element_id
                .strip_prefix("miniMap")
                .map(|index| format!("map{}", index)),
            PlaceholderKind::OptionMap => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_location_serializes_with_kind_tag() {
        let place = ResolvedLocation::PlaceQuery {
            place_name: "Bristol Pub".to_string(),
        };
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["kind"], "place_query");
        assert_eq!(json["placeName"], "Bristol Pub");

        let coords = ResolvedLocation::Coordinates(Coordinates::new(22.16, -100.99));
        let json = serde_json::to_value(&coords).unwrap();
        assert_eq!(json["kind"], "coordinates");
        assert_eq!(json["lat"], 22.16);
    }

    #[test]
    fn test_selection_replace_returns_previous() {
        let mut selection = VoteSelection::default();
        assert_eq!(selection.replace("0".to_string()), None);
        assert_eq!(selection.replace("1".to_string()), Some("0".to_string()));
        assert_eq!(selection.value(), Some("1"));
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_mini_map_pairing() {
        assert_eq!(MapPlaceholder::mini_map(2).paired_map_id(), Some("map2".to_string()));
        assert_eq!(MapPlaceholder::option_map(2, "x").paired_map_id(), None);
    }
}
