use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::MapSettings;
use crate::core::{extract_place_label, LocationResolver};
use crate::maps::adapter::{MapError, MapOptions, MapRenderer, MarkerOptions};
use crate::maps::panel::FallbackPanel;
use crate::maps::registry::{MapEntry, MapRegistry};
use crate::models::{MapPlaceholder, PlaceholderKind};

/// What happened to a placeholder element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlaceholderOutcome {
    /// A live map was created; the element gets the `loaded` class
    Map {
        #[serde(rename = "elementId")]
        element_id: String,
        #[serde(rename = "handleId")]
        handle_id: Uuid,
        /// Opened in a new browsing context when the map is clicked
        #[serde(rename = "clickThrough")]
        click_through: Option<String>,
        title: Option<String>,
    },
    /// The element's contents are replaced by a panel
    Fallback {
        #[serde(rename = "elementId")]
        element_id: String,
        panel: FallbackPanel,
    },
    /// Nothing to show (no location, or no paired voting map)
    Untouched {
        #[serde(rename = "elementId")]
        element_id: String,
    },
}

impl PlaceholderOutcome {
    pub fn element_id(&self) -> &str {
        match self {
            PlaceholderOutcome::Map { element_id, .. }
            | PlaceholderOutcome::Fallback { element_id, .. }
            | PlaceholderOutcome::Untouched { element_id } => element_id,
        }
    }

    pub fn panel(&self) -> Option<&FallbackPanel> {
        match self {
            PlaceholderOutcome::Fallback { panel, .. } => Some(panel),
            _ => None,
        }
    }
}

/// Owns every map on a page view and decides map vs. fallback per placeholder
pub struct MapBoard<R: MapRenderer> {
    renderer: R,
    resolver: LocationResolver,
    settings: MapSettings,
    registry: MapRegistry,
    loaded: bool,
}

impl<R: MapRenderer> MapBoard<R> {
    pub fn new(renderer: R, resolver: LocationResolver, settings: MapSettings) -> Self {
        Self {
            renderer,
            resolver,
            settings,
            registry: MapRegistry::new(),
            loaded: false,
        }
    }

    /// Map-library-ready callback
    ///
    /// Voting maps are laid out first so mini maps can mirror their centers.
    /// Any SDK failure disposes what was built and shows the "map unavailable"
    /// notice on every placeholder.
    pub fn init_maps(&mut self, placeholders: &[MapPlaceholder]) -> Vec<PlaceholderOutcome> {
        info!("Map library ready, laying out {} placeholders", placeholders.len());
        self.loaded = true;

        match self.layout(placeholders) {
            Ok(outcomes) => outcomes,
            Err(e) => {
                error!("Error initializing maps: {}", e);
                self.dispose_all();
                show_map_error(placeholders)
            }
        }
    }

    /// The map library could not be loaded at all
    pub fn on_load_failed(&mut self, placeholders: &[MapPlaceholder], reason: &str) -> Vec<PlaceholderOutcome> {
        error!("{}", MapError::SdkUnavailable(reason.to_string()));
        self.loaded = false;
        self.dispose_all();
        show_map_error(placeholders)
    }

    /// Re-layout every live map after dynamic content changes
    pub fn refresh_maps(&mut self) -> usize {
        let mut count = 0;
        for (_, entry) in self.registry.entries() {
            self.renderer.resize(&entry.map);
            count += 1;
        }
        count
    }

    /// Remove the map hosted by one element
    pub fn dispose(&mut self, element_id: &str) -> bool {
        match self.registry.remove(element_id) {
            Some(entry) => {
                self.renderer.remove(&entry.map);
                true
            }
            None => false,
        }
    }

    /// Tear down every map, e.g. on leaving the page view
    pub fn dispose_all(&mut self) {
        for entry in self.registry.drain() {
            self.renderer.remove(&entry.map);
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn registry(&self) -> &MapRegistry {
        &self.registry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn layout(&mut self, placeholders: &[MapPlaceholder]) -> Result<Vec<PlaceholderOutcome>, MapError> {
        let mut outcomes: Vec<Option<PlaceholderOutcome>> = vec![None; placeholders.len()];

        for (slot, placeholder) in outcomes.iter_mut().zip(placeholders) {
            if placeholder.kind == PlaceholderKind::OptionMap {
                *slot = Some(self.init_option_map(placeholder)?);
            }
        }

        for (slot, placeholder) in outcomes.iter_mut().zip(placeholders) {
            if placeholder.kind == PlaceholderKind::MiniMap {
                *slot = Some(self.init_mini_map(placeholder)?);
            }
        }

        Ok(outcomes.into_iter().flatten().collect())
    }

    fn init_option_map(&mut self, placeholder: &MapPlaceholder) -> Result<PlaceholderOutcome, MapError> {
        let element_id = placeholder.element_id.clone();
        let url = match placeholder.location.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => return Ok(PlaceholderOutcome::Untouched { element_id }),
        };

        let location = self.resolver.resolve(url);
        let label = extract_place_label(url);

        let Some(center) = location.coordinates() else {
            return Ok(PlaceholderOutcome::Fallback {
                element_id,
                panel: FallbackPanel::for_location(&location, url),
            });
        };

        let map = self
            .renderer
            .create_map(&element_id, &MapOptions::voting(center, &self.settings))?;
        let marker_options = MarkerOptions::voting(center, label.clone(), &self.settings);
        let marker = match self.renderer.add_marker(&map, &marker_options) {
            Ok(marker) => marker,
            Err(e) => {
                self.renderer.remove(&map);
                return Err(e);
            }
        };

        let handle_id = map.id;
        self.register(
            &element_id,
            MapEntry {
                map,
                marker: Some(marker),
                location_url: Some(url.to_string()),
            },
        );

        Ok(PlaceholderOutcome::Map {
            element_id,
            handle_id,
            click_through: Some(url.to_string()),
            title: marker_options.title,
        })
    }

    fn init_mini_map(&mut self, placeholder: &MapPlaceholder) -> Result<PlaceholderOutcome, MapError> {
        let element_id = placeholder.element_id.clone();
        let Some(center) = placeholder
            .paired_map_id()
            .and_then(|paired| self.registry.center_of(&paired))
        else {
            return Ok(PlaceholderOutcome::Untouched { element_id });
        };

        let map = self
            .renderer
            .create_map(&element_id, &MapOptions::mini(center, &self.settings))?;
        let marker = match self
            .renderer
            .add_marker(&map, &MarkerOptions::mini(center, &self.settings))
        {
            Ok(marker) => marker,
            Err(e) => {
                self.renderer.remove(&map);
                return Err(e);
            }
        };

        let handle_id = map.id;
        self.register(
            &element_id,
            MapEntry {
                map,
                marker: Some(marker),
                location_url: None,
            },
        );

        Ok(PlaceholderOutcome::Map {
            element_id,
            handle_id,
            click_through: None,
            title: None,
        })
    }

    fn register(&mut self, element_id: &str, entry: MapEntry) {
        if let Some(previous) = self.registry.insert(element_id, entry) {
            self.renderer.remove(&previous.map);
        }
    }
}

/// Uniform "map unavailable" notice for every placeholder
pub fn show_map_error(placeholders: &[MapPlaceholder]) -> Vec<PlaceholderOutcome> {
    placeholders
        .iter()
        .map(|placeholder| PlaceholderOutcome::Fallback {
            element_id: placeholder.element_id.clone(),
            panel: FallbackPanel::MapUnavailable,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::adapter::WidgetSpecRenderer;

    fn board() -> MapBoard<WidgetSpecRenderer> {
        MapBoard::new(
            WidgetSpecRenderer::new(),
            LocationResolver::with_default_hosts(),
            MapSettings::default(),
        )
    }

    #[test]
    fn test_coordinates_create_map() {
        let mut board = board();
        let placeholders = vec![MapPlaceholder::option_map(
            0,
            "https://www.google.com/maps/place/Bristol+Pub/@22.1527705,-101.0132917,17z",
        )];

        let outcomes = board.init_maps(&placeholders);

        match &outcomes[0] {
            PlaceholderOutcome::Map { title, click_through, .. } => {
                assert_eq!(title.as_deref(), Some("Bristol Pub"));
                assert!(click_through.is_some());
            }
            other => panic!("expected map, got {:?}", other),
        }
        assert_eq!(board.registry().len(), 1);
        assert_eq!(board.renderer().widgets().len(), 1);
    }

    #[test]
    fn test_zero_coordinates_still_draw_a_map() {
        let mut board = board();
        let outcomes = board.init_maps(&[MapPlaceholder::option_map(0, "https://maps.google.com/@0,0")]);
        assert!(matches!(outcomes[0], PlaceholderOutcome::Map { .. }));
    }

    #[test]
    fn test_missing_location_is_untouched() {
        let mut board = board();
        let placeholder = MapPlaceholder {
            element_id: "map0".to_string(),
            kind: PlaceholderKind::OptionMap,
            location: None,
        };
        let outcomes = board.init_maps(&[placeholder]);
        assert_eq!(
            outcomes[0],
            PlaceholderOutcome::Untouched {
                element_id: "map0".to_string()
            }
        );
    }

    #[test]
    fn test_reinit_replaces_registered_map() {
        let mut board = board();
        let placeholders = vec![MapPlaceholder::option_map(0, "https://maps.google.com/@1,2")];

        board.init_maps(&placeholders);
        board.init_maps(&placeholders);

        assert_eq!(board.registry().len(), 1);
        assert_eq!(board.renderer().widgets().len(), 1);
    }

    #[test]
    fn test_refresh_and_dispose() {
        let mut board = board();
        board.init_maps(&[
            MapPlaceholder::option_map(0, "https://maps.google.com/@1,2"),
            MapPlaceholder::option_map(1, "https://maps.google.com/@3,4"),
        ]);

        assert_eq!(board.refresh_maps(), 2);
        assert!(board.dispose("map0"));
        assert!(!board.dispose("map0"));
        assert_eq!(board.refresh_maps(), 1);

        board.dispose_all();
        assert!(board.registry().is_empty());
        assert!(board.renderer().widgets().is_empty());
    }
}
