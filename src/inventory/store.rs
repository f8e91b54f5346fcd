//! Inventory state: the tracked class set and its counters.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::inventory::counters::{InventoryCounters, saturating_count};
use crate::inventory::detection::DetectionResult;

/// Tracked classes and their counters, in initialization order.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    classes: Vec<(String, InventoryCounters)>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all state with a baseline taken from one field-camera result.
    ///
    /// The tracked set becomes exactly the classes with at least one region;
    /// a class seen zero times stays untracked until a later initialize sees
    /// it. Returns the number of tracked classes.
    pub fn initialize(&mut self, field: &DetectionResult) -> usize {
        self.classes = field
            .iter()
            .filter(|(_, regions)| !regions.is_empty())
            .map(|(class, regions)| {
                (
                    class.to_string(),
                    InventoryCounters::baseline(saturating_count(regions.len())),
                )
            })
            .collect();
        self.classes.len()
    }

    /// Snapshot of all counters for display or serialization.
    pub fn get_counts(&self) -> CountsSnapshot {
        CountsSnapshot(self.classes.clone())
    }

    pub fn get(&self, class: &str) -> Option<&InventoryCounters> {
        self.classes
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, counters)| counters)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut InventoryCounters)> {
        self.classes
            .iter_mut()
            .map(|(name, counters)| (name.as_str(), counters))
    }
}

/// Owned, ordered copy of the counters. Serializes as a JSON object keyed by
/// class name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountsSnapshot(Vec<(String, InventoryCounters)>);

impl CountsSnapshot {
    pub fn get(&self, class: &str) -> Option<&InventoryCounters> {
        self.0
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, counters)| counters)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InventoryCounters)> {
        self.0.iter().map(|(name, counters)| (name.as_str(), counters))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CountsSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, counters) in &self.0 {
            map.serialize_entry(name, counters)?;
        }
        map.end()
    }
}
