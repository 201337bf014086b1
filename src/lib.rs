//! Restaurant Poll - vote-page interaction controller and map-link resolver
//!
//! This library turns pasted map-service links into renderable map previews and
//! drives the voting page's selection, submission and results refresh as a
//! headless state machine.

pub mod config;
pub mod core;
pub mod maps;
pub mod models;
pub mod routes;
pub mod ui;

// Re-export commonly used types
pub use core::{extract_place_label, LocationResolver};
pub use maps::{FallbackPanel, MapBoard, MapRenderer, PlaceholderOutcome};
pub use models::{Coordinates, LocationQuery, MapPlaceholder, MatchRule, ResolvedLocation, VotingOption};
pub use ui::{AutoRefresher, Effect, UiEvent, VoteController};

/// Classify a location URL with the default shortener hosts
pub fn resolve(url: &str) -> ResolvedLocation {
    LocationResolver::with_default_hosts().resolve(url)
}
