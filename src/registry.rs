//! Terrain registry: the color-keyed legend of a map
//!
//! The registry is the single source of truth for what a pixel color means.
//! Inserts are first-write-wins and never fail; lookups of unregistered
//! colors fall back to the `unknown` descriptor.

use std::collections::HashMap;
use std::sync::Arc;

use image::Rgba;
use tracing::debug;

use crate::terrain::TerrainDescriptor;

/// What an [`TerrainRegistry::insert`] call did.
///
/// Both skip variants are successful calls with no effect; callers that only
/// care about the historical silent behavior can ignore the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new entry was added
    Inserted,
    /// The color was already registered; the existing entry was kept
    Duplicate,
    /// The name or symbol was empty
    MissingField,
}

/// Color to terrain mapping with unique keys, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TerrainRegistry {
    index: HashMap<Rgba<u8>, usize>,
    entries: Vec<Arc<TerrainDescriptor>>,
}

impl TerrainRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `color` as the terrain `name` displayed with `symbol`.
    ///
    /// Does nothing if the color is already registered or if either string
    /// is empty.
    pub fn insert(&mut self, name: &str, symbol: &str, color: Rgba<u8>) -> InsertOutcome {
        if self.index.contains_key(&color) {
            debug!(terrain = name, symbol, ?color, "color already registered, insert skipped");
            return InsertOutcome::Duplicate;
        }
        if name.is_empty() || symbol.is_empty() {
            debug!(terrain = name, symbol, ?color, "empty name or symbol, insert skipped");
            return InsertOutcome::MissingField;
        }

        self.index.insert(color, self.entries.len());
        self.entries.push(Arc::new(TerrainDescriptor::new(name, symbol, color)));
        InsertOutcome::Inserted
    }

    /// Resolve a pixel color to its terrain.
    ///
    /// Unregistered colors resolve to a fresh `unknown` descriptor whose color
    /// is blank, not the color that was queried.
    pub fn resolve(&self, color: Rgba<u8>) -> Arc<TerrainDescriptor> {
        match self.get(color) {
            Some(terrain) => Arc::clone(terrain),
            None => Arc::new(TerrainDescriptor::unknown()),
        }
    }

    /// Get the registered descriptor for an exact color match.
    pub fn get(&self, color: Rgba<u8>) -> Option<&Arc<TerrainDescriptor>> {
        self.index.get(&color).map(|&i| &self.entries[i])
    }

    /// Check if a color is registered.
    pub fn contains(&self, color: Rgba<u8>) -> bool {
        self.index.contains_key(&color)
    }

    /// All registered descriptors in insertion order.
    pub fn entries(&self) -> &[Arc<TerrainDescriptor>] {
        &self.entries
    }

    /// Iterate over `(color, descriptor)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Rgba<u8>, &Arc<TerrainDescriptor>)> {
        self.entries.iter().map(|terrain| (terrain.color(), terrain))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
