//! Last-observed device state, keyed by device index.
//!
//! [`Registry`] is the differ's single source of truth: one
//! [`DeviceSnapshot`](crate::device::DeviceSnapshot) per connected device,
//! overwritten in place on every poll. It does not grow across frames beyond
//! the live device count: entries appear on connect, are replaced on each
//! enumeration, and vanish on disconnect.
//!
//! # Semantics
//! - Keys are the source-assigned device indices.
//! - Iteration order is by index (ordered map), so diff passes and event
//!   emission are deterministic.
//! - Cloning the registry yields the frame's `previous` view; the clone is
//!   an owned snapshot and is not affected by subsequent inserts.

use crate::device::{DeviceSnapshot, DeviceSummary};
use std::collections::BTreeMap;

/// Owned map of last-observed device snapshots (`index → snapshot`).
#[derive(Clone, Debug, Default)]
pub struct Registry(BTreeMap<u16, DeviceSnapshot>);

impl Registry {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert or overwrite the entry for `snapshot.index`.
    pub fn insert(&mut self, snapshot: DeviceSnapshot) {
        self.0.insert(snapshot.index, snapshot);
    }

    /// Remove and return the entry for `index`, if present.
    pub fn remove(&mut self, index: u16) -> Option<DeviceSnapshot> {
        self.0.remove(&index)
    }

    /// Last-observed snapshot for `index`.
    #[inline]
    pub fn get(&self, index: u16) -> Option<&DeviceSnapshot> {
        self.0.get(&index)
    }

    #[inline]
    pub fn contains(&self, index: u16) -> bool {
        self.0.contains_key(&index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterate `(index, snapshot)` pairs in index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&u16, &DeviceSnapshot)> {
        self.0.iter()
    }

    /// Summary map of every known device, for connection payloads.
    pub fn summaries(&self) -> BTreeMap<u16, DeviceSummary> {
        self.0
            .iter()
            .map(|(&index, snapshot)| (index, snapshot.summary()))
            .collect()
    }

    /// Consume the registry and return the inner map.
    #[inline]
    pub fn into_inner(self) -> BTreeMap<u16, DeviceSnapshot> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut registry = Registry::new();
        registry.insert(DeviceSnapshot::new(0, "pad"));
        registry.insert(DeviceSnapshot {
            timestamp: 5.0,
            ..DeviceSnapshot::new(0, "pad")
        });

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).unwrap().timestamp, 5.0);
    }

    #[test]
    fn clone_is_an_independent_snapshot() {
        let mut registry = Registry::new();
        registry.insert(DeviceSnapshot::new(0, "pad"));

        let previous = registry.clone();
        registry.insert(DeviceSnapshot::new(1, "other pad"));
        registry.remove(0);

        assert_eq!(previous.len(), 1);
        assert!(previous.contains(0));
        assert!(!previous.contains(1));
    }
}
