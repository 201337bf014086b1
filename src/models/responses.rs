use serde::{Deserialize, Serialize};

use crate::maps::{FallbackPanel, MapWidgetSpec, PlaceholderOutcome};
use crate::models::domain::{MatchRule, ResolvedLocation};

/// Response for the resolve endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveLocationResponse {
    pub resolution: ResolvedLocation,
    pub rule: Option<MatchRule>,
    pub label: Option<String>,
    /// Present when the location can be shown as a live map
    pub widget: Option<MapWidgetSpec>,
    /// Present when a fallback panel replaces the map
    pub panel: Option<FallbackPanel>,
}

/// Response for the map board endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapBoardResponse {
    pub outcomes: Vec<PlaceholderOutcome>,
    pub widgets: Vec<MapWidgetSpec>,
}

/// Accepted "add option" text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOptionResponse {
    pub text: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
