use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::MapSettings;
use crate::models::Coordinates;

/// Errors reported by a map SDK
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Map library unavailable: {0}")]
    SdkUnavailable(String),

    #[error("Failed to create map in {element_id}: {reason}")]
    CreateFailed { element_id: String, reason: String },

    #[error("Failed to place marker: {0}")]
    MarkerFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    Roadmap,
    Satellite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureHandling {
    None,
    Cooperative,
    Greedy,
}

/// One entry of a map style list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStyle {
    pub feature_type: String,
    pub element_type: String,
    pub visibility: String,
}

/// Options handed to the SDK when a map is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub zoom: u8,
    pub center: Coordinates,
    pub map_id: String,
    pub map_type: MapType,
    pub disable_default_ui: bool,
    pub zoom_control: bool,
    pub scrollwheel: bool,
    pub gesture_handling: GestureHandling,
    pub clickable_icons: bool,
    pub styles: Vec<MapStyle>,
}

impl MapOptions {
    /// Preview map for an option card on the voting view
    pub fn voting(center: Coordinates, settings: &MapSettings) -> Self {
        Self {
            zoom: settings.voting_zoom,
            center,
            map_id: settings.voting_map_id.clone(),
            map_type: MapType::Roadmap,
            disable_default_ui: true,
            zoom_control: true,
            scrollwheel: false,
            gesture_handling: GestureHandling::None,
            clickable_icons: true,
            styles: vec![MapStyle {
                feature_type: "poi".to_string(),
                element_type: "labels.text".to_string(),
                visibility: "on".to_string(),
            }],
        }
    }

    /// Static thumbnail on the management view
    pub fn mini(center: Coordinates, settings: &MapSettings) -> Self {
        Self {
            zoom: settings.mini_zoom,
            center,
            map_id: settings.mini_map_id.clone(),
            map_type: MapType::Roadmap,
            disable_default_ui: true,
            zoom_control: false,
            scrollwheel: false,
            gesture_handling: GestureHandling::None,
            clickable_icons: false,
            styles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    pub url: String,
    pub size_px: u16,
}

/// Marker placed at the center of a map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOptions {
    pub position: Coordinates,
    pub title: Option<String>,
    pub icon: MarkerIcon,
}

impl MarkerOptions {
    pub fn voting(position: Coordinates, label: Option<String>, settings: &MapSettings) -> Self {
        Self {
            position,
            title: Some(label.unwrap_or_else(|| settings.default_marker_title.clone())),
            icon: MarkerIcon {
                url: settings.marker_icon_url.clone(),
                size_px: settings.marker_size_px,
            },
        }
    }

    pub fn mini(position: Coordinates, settings: &MapSettings) -> Self {
        Self {
            position,
            title: None,
            icon: MarkerIcon {
                url: settings.marker_icon_url.clone(),
                size_px: settings.mini_marker_size_px,
            },
        }
    }
}

/// Reference to a live map instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapHandle {
    pub id: Uuid,
    pub element_id: String,
    pub center: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerHandle {
    pub id: Uuid,
    pub map_id: Uuid,
}

/// External mapping SDK
pub trait MapRenderer {
    fn create_map(&mut self, element_id: &str, options: &MapOptions) -> Result<MapHandle, MapError>;

    fn add_marker(&mut self, map: &MapHandle, marker: &MarkerOptions) -> Result<MarkerHandle, MapError>;

    /// Re-layout after the container changed size
    fn resize(&mut self, map: &MapHandle);

    fn remove(&mut self, map: &MapHandle);
}

/// Serializable description of a map a browser-side SDK shim should build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapWidgetSpec {
    pub handle_id: Uuid,
    pub element_id: String,
    pub options: MapOptions,
    pub markers: Vec<MarkerOptions>,
}

/// Renderer that records widget specs instead of drawing
#[derive(Debug, Default)]
pub struct WidgetSpecRenderer {
    widgets: Vec<MapWidgetSpec>,
}

impl WidgetSpecRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn widgets(&self) -> &[MapWidgetSpec] {
        &self.widgets
    }

    pub fn into_widgets(self) -> Vec<MapWidgetSpec> {
        self.widgets
    }
}

impl MapRenderer for WidgetSpecRenderer {
    fn create_map(&mut self, element_id: &str, options: &MapOptions) -> Result<MapHandle, MapError> {
        let handle = MapHandle {
            id: Uuid::new_v4(),
            element_id: element_id.to_string(),
            center: options.center,
        };
        self.widgets.push(MapWidgetSpec {
            handle_id: handle.id,
            element_id: element_id.to_string(),
            options: options.clone(),
            markers: Vec::new(),
        });
        Ok(handle)
    }

    fn add_marker(&mut self, map: &MapHandle, marker: &MarkerOptions) -> Result<MarkerHandle, MapError> {
        let widget = self
            .widgets
            .iter_mut()
            .find(|w| w.handle_id == map.id)
            .ok_or_else(|| MapError::MarkerFailed(format!("unknown map {}", map.id)))?;
        widget.markers.push(marker.clone());
        Ok(MarkerHandle {
            id: Uuid::new_v4(),
            map_id: map.id,
        })
    }

    fn resize(&mut self, map: &MapHandle) {
        tracing::trace!("Resize requested for {}", map.element_id);
    }

    fn remove(&mut self, map: &MapHandle) {
        self.widgets.retain(|w| w.handle_id != map.id);
    }
}
