//! Scriptable in-memory source.
//!
//! [`VirtualSource`] is a [`DeviceSource`] fed entirely by the caller: tests
//! and demos script connects, disconnects and state changes, and the differ
//! consumes them exactly as it would consume a platform backend.
//!
//! padwatch reads input devices; it does not create OS-level virtual devices
//! (vJoy/uinput).

use crate::device::{DeviceSignal, DeviceSnapshot, DeviceSource, Feature};
use std::collections::BTreeMap;

/// In-memory device source driven by explicit calls.
#[derive(Default)]
pub struct VirtualSource {
    supported: bool,
    present: BTreeMap<u16, DeviceSnapshot>,
    pending: Vec<DeviceSignal>,
}

impl VirtualSource {
    /// An empty source that reports the device API as available.
    pub fn new() -> Self {
        Self {
            supported: true,
            present: BTreeMap::new(),
            pending: Vec::new(),
        }
    }

    /// A source that reports no device-API capability at all.
    ///
    /// Lets callers exercise the degraded mode where
    /// [`enable`](crate::differ::InputDiffer::enable) stays a no-op.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            present: BTreeMap::new(),
            pending: Vec::new(),
        }
    }

    /// Make a device present and raise a connect signal for it.
    pub fn connect(&mut self, snapshot: DeviceSnapshot) {
        self.pending
            .push(DeviceSignal::Connected(snapshot.clone()));
        self.present.insert(snapshot.index, snapshot);
    }

    /// Remove a device and raise a disconnect signal carrying its last
    /// state, marked disconnected.
    pub fn disconnect(&mut self, index: u16) {
        if let Some(mut snapshot) = self.present.remove(&index) {
            snapshot.connected = false;
            self.pending.push(DeviceSignal::Disconnected(snapshot));
        }
    }

    /// Overwrite (or silently add) a device's current state, without raising
    /// any signal. This is the enumeration-only path.
    pub fn set_state(&mut self, snapshot: DeviceSnapshot) {
        self.present.insert(snapshot.index, snapshot);
    }
}

impl DeviceSource for VirtualSource {
    fn is_feature_supported(&self, feature: Feature) -> bool {
        match feature {
            Feature::DeviceApi => self.supported,
        }
    }

    fn enumerate(&mut self) -> Vec<DeviceSnapshot> {
        self.present.values().cloned().collect()
    }

    fn drain_signals(&mut self) -> Vec<DeviceSignal> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_drain_once() {
        let mut source = VirtualSource::new();
        source.connect(DeviceSnapshot::new(0, "pad"));
        source.disconnect(0);

        assert_eq!(source.drain_signals().len(), 2);
        assert!(source.drain_signals().is_empty());
    }

    #[test]
    fn disconnect_marks_the_carried_snapshot() {
        let mut source = VirtualSource::new();
        source.connect(DeviceSnapshot::new(3, "pad"));
        source.drain_signals();
        source.disconnect(3);

        match source.drain_signals().pop() {
            Some(DeviceSignal::Disconnected(snapshot)) => {
                assert_eq!(snapshot.index, 3);
                assert!(!snapshot.connected);
            }
            other => panic!("expected a disconnect signal, got {other:?}"),
        }
        assert!(source.enumerate().is_empty());
    }

    #[test]
    fn disconnecting_an_unknown_index_is_a_noop() {
        let mut source = VirtualSource::new();
        source.disconnect(9);
        assert!(source.drain_signals().is_empty());
    }
}
