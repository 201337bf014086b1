use std::collections::HashMap;

use crate::maps::adapter::{MapHandle, MarkerHandle};
use crate::models::Coordinates;

/// A live map and its marker
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub map: MapHandle,
    pub marker: Option<MarkerHandle>,
    /// Original location URL, opened on click
    pub location_url: Option<String>,
}

/// Live maps keyed by the id of the element hosting them
///
/// Owned by a single `MapBoard`; entries are created when a placeholder is
/// rendered, replaced when the same element is rendered again, and disposed on
/// page-view transitions.
#[derive(Debug, Default)]
pub struct MapRegistry {
    entries: HashMap<String, MapEntry>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a map, returning the entry it replaced
    pub fn insert(&mut self, element_id: impl Into<String>, entry: MapEntry) -> Option<MapEntry> {
        self.entries.insert(element_id.into(), entry)
    }

    pub fn get(&self, element_id: &str) -> Option<&MapEntry> {
        self.entries.get(element_id)
    }

    pub fn center_of(&self, element_id: &str) -> Option<Coordinates> {
        self.entries.get(element_id).map(|entry| entry.map.center)
    }

    pub fn remove(&mut self, element_id: &str) -> Option<MapEntry> {
        self.entries.remove(element_id)
    }

    pub fn drain(&mut self) -> Vec<MapEntry> {
        self.entries.drain().map(|(_, entry)| entry).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &MapEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
