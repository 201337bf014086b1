use serde::{Deserialize, Serialize};

use crate::models::ResolvedLocation;

/// Styled stand-in shown where a live map cannot be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackPanel {
    /// Shortened link, opening it lets the map service expand it
    ShortLink { url: String },
    /// Place known by name only
    Place {
        #[serde(rename = "placeName")]
        place_name: String,
        url: String,
    },
    /// Nothing could be parsed; just link out
    ExternalLink { url: String },
    /// The map SDK failed to load
    MapUnavailable,
}

struct PanelStyle {
    background: &'static str,
    icon: &'static str,
}

impl FallbackPanel {
    /// Panel for a location that is not drawn as a live map
    ///
    /// Coordinates only reach this when no map could be created and get the
    /// plain external link.
    pub fn for_location(location: &ResolvedLocation, url: &str) -> Self {
        let url = url.to_string();
        match location {
            ResolvedLocation::ShortLink => FallbackPanel::ShortLink { url },
            ResolvedLocation::PlaceQuery { place_name } => FallbackPanel::Place {
                place_name: place_name.clone(),
                url,
            },
            ResolvedLocation::Coordinates(_) | ResolvedLocation::Unresolved => {
                FallbackPanel::ExternalLink { url }
            }
        }
    }

    /// URL opened in a new browsing context when the panel is clicked
    pub fn open_url(&self) -> Option<&str> {
        match self {
            FallbackPanel::ShortLink { url }
            | FallbackPanel::Place { url, .. }
            | FallbackPanel::ExternalLink { url } => Some(url),
            FallbackPanel::MapUnavailable => None,
        }
    }

    fn style(&self) -> PanelStyle {
        match self {
            FallbackPanel::ShortLink { .. } => PanelStyle {
                background: "linear-gradient(135deg, #ff6b35, #f7931e)",
                icon: "fa-external-link-alt",
            },
            FallbackPanel::Place { .. } => PanelStyle {
                background: "linear-gradient(135deg, #6c757d, #495057)",
                icon: "fa-search-location",
            },
            FallbackPanel::ExternalLink { .. } => PanelStyle {
                background: "linear-gradient(135deg, #4285f4, #34a853)",
                icon: "fa-map-marked-alt",
            },
            FallbackPanel::MapUnavailable => PanelStyle {
                background: "#f8f9fa",
                icon: "fa-exclamation-triangle",
            },
        }
    }

    /// Markup that replaces the placeholder's contents
    pub fn render_html(&self) -> String {
        let style = self.style();

        if let FallbackPanel::MapUnavailable = self {
            return format!(
                r#"<div class="d-flex align-items-center justify-content-center h-100" style="background: {}; color: #6c757d;"><small><i class="fas {}"></i> Map unavailable</small></div>"#,
                style.background, style.icon
            );
        }

        let caption = match self {
            FallbackPanel::ShortLink { .. } => "Short URL - Click to expand".to_string(),
            FallbackPanel::Place { place_name, .. } => {
                format!("{}<br>Click to view", escape_html(place_name))
            }
            _ => "Click to view location".to_string(),
        };
        let href = self.open_url().map(escape_html).unwrap_or_default();

        format!(
            r#"<a class="d-flex align-items-center justify-content-center h-100 text-decoration-none" href="{}" target="_blank" rel="noopener" style="background: {}; color: white; cursor: pointer;"><div class="text-center"><i class="fas {} fa-2x mb-2"></i><br><small>{}</small></div></a>"#,
            href, style.background, style.icon, caption
        )
    }
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    #[test]
    fn test_panel_per_classification() {
        let url = "https://maps.app.goo.gl/abc";
        assert_eq!(
            FallbackPanel::for_location(&ResolvedLocation::ShortLink, url),
            FallbackPanel::ShortLink { url: url.to_string() }
        );
        assert_eq!(
            FallbackPanel::for_location(&ResolvedLocation::Unresolved, url),
            FallbackPanel::ExternalLink { url: url.to_string() }
        );
        assert_eq!(
            FallbackPanel::for_location(
                &ResolvedLocation::Coordinates(Coordinates::new(1.0, 2.0)),
                url
            )
            .open_url(),
            Some(url)
        );
    }

    #[test]
    fn test_place_name_is_escaped() {
        let panel = FallbackPanel::Place {
            place_name: "<script>alert(1)</script>".to_string(),
            url: "https://example.com/?a=1&b='2'".to_string(),
        };
        let html = panel.render_html();
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;<br>Click to view"));
        assert!(html.contains(r#"href="https://example.com/?a=1&amp;b=&#39;2&#39;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_map_unavailable_has_no_link() {
        let panel = FallbackPanel::MapUnavailable;
        assert_eq!(panel.open_url(), None);
        let html = panel.render_html();
        assert!(html.contains("Map unavailable"));
        assert!(!html.contains("href"));
    }
}
