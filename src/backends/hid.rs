//! hidapi-backed device discovery.
//!
//! [`HidSource`] turns the system HID device list into padwatch snapshots:
//! it filters the list down to game controls, assigns each physical path a
//! stable device index, and synthesizes connect/disconnect signals by
//! diffing successive enumerations.
//!
//! ## What this backend does *not* do
//! Decoding HID input reports requires a descriptor-driven parser (report
//! IDs, usage ranges, logical scaling per device). That machinery is out of
//! this crate's scope, so HID snapshots carry identity and connection state
//! with **empty button/axis lists**, which is enough for registries,
//! connection events and store payloads. Full channel data comes from layout-aware
//! backends such as [`xinput`](crate::backends::windows::xinput).
//!
//! ## Filtering rules
//! - Accept Generic Desktop (usage page `0x01`) joystick / gamepad /
//!   multi-axis usages (`0x04`, `0x05`, `0x08`).
//! - Reject XInput HID-compat `IG_` endpoints to avoid double-counting
//!   devices the XInput backend already covers.

use crate::backends::BackendError;
use crate::device::{DeviceSignal, DeviceSnapshot, DeviceSource, Feature};
use hidapi::HidApi;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// How often the OS device list is re-read. Enumeration itself must stay
/// cheap enough for a frame loop; the actual bus walk happens at most this
/// often.
const SCAN_INTERVAL: Duration = Duration::from_millis(500);

/// Decide whether a HID entry should be surfaced as an input device.
fn accept_entry(usage_page: u16, usage: u16, path: &str) -> bool {
    // Generic Desktop only; joystick (0x04), gamepad (0x05), multi-axis (0x08).
    if usage_page != 0x01 || !matches!(usage, 0x04 | 0x05 | 0x08) {
        return false;
    }

    // XInput compatibility endpoints carry "IG_" in their path (case varies
    // by OS stack). Those pads are reachable through the XInput backend;
    // listing them here would double-count.
    if path.to_ascii_uppercase().contains("IG_") {
        return false;
    }

    true
}

/// HID discovery source.
///
/// Assigned indices are stable for the lifetime of the source: a path seen
/// again after a disconnect keeps its old index, so registries and bindings
/// survive a cable wiggle.
pub struct HidSource {
    api: HidApi,
    /// Monotonic scan counter, doubles as the snapshot timestamp.
    scan: u64,
    last_scan: Option<Instant>,
    devices: BTreeMap<u16, DeviceSnapshot>,
    /// OS path → assigned index, including past (disconnected) devices.
    indices: HashMap<String, u16>,
    next_index: u16,
    pending: Vec<DeviceSignal>,
}

impl HidSource {
    pub fn new() -> Result<Self, BackendError> {
        let api = HidApi::new()?;
        Ok(Self {
            api,
            scan: 0,
            last_scan: None,
            devices: BTreeMap::new(),
            indices: HashMap::new(),
            next_index: 0,
            pending: Vec::new(),
        })
    }

    fn index_for(&mut self, path: &str) -> u16 {
        if let Some(&index) = self.indices.get(path) {
            return index;
        }
        let index = self.next_index;
        self.next_index += 1;
        self.indices.insert(path.to_string(), index);
        index
    }

    /// Re-read the device list and queue signals for the differences.
    ///
    /// Scan failures are swallowed: the previous view stays in place and the
    /// next interval retries. A missing frame of discovery is not worth
    /// stalling the frame loop over.
    fn rescan(&mut self) {
        if let Some(last) = self.last_scan {
            if last.elapsed() < SCAN_INTERVAL {
                return;
            }
        }
        self.last_scan = Some(Instant::now());

        if let Err(_err) = self.api.refresh_devices() {
            #[cfg(feature = "debug-log")]
            eprintln!("[HID/SCAN] refresh failed: {_err}");
            return;
        }
        self.scan += 1;

        let mut seen: Vec<(u16, DeviceSnapshot)> = Vec::new();
        let entries: Vec<(String, String)> = self
            .api
            .device_list()
            .filter(|info| {
                accept_entry(
                    info.usage_page(),
                    info.usage(),
                    &info.path().to_string_lossy(),
                )
            })
            .map(|info| {
                let product = info.product_string().unwrap_or("HID Controller");
                (
                    info.path().to_string_lossy().to_string(),
                    format!(
                        "{} (Vendor: {:04x} Product: {:04x})",
                        product,
                        info.vendor_id(),
                        info.product_id()
                    ),
                )
            })
            .collect();

        for (path, id) in entries {
            let index = self.index_for(&path);
            // TODO: decode input reports through a HIDP-style descriptor
            // parser so these snapshots carry buttons/axes.
            let snapshot = DeviceSnapshot {
                timestamp: self.scan as f64,
                ..DeviceSnapshot::new(index, id)
            };
            seen.push((index, snapshot));
        }

        // Departed devices first: anything we knew that the fresh list lacks.
        let current: Vec<u16> = seen.iter().map(|(index, _)| *index).collect();
        let gone: Vec<u16> = self
            .devices
            .keys()
            .copied()
            .filter(|index| !current.contains(index))
            .collect();
        for index in gone {
            if let Some(mut snapshot) = self.devices.remove(&index) {
                snapshot.connected = false;
                #[cfg(feature = "debug-log")]
                eprintln!("[HID/DISCONNECT] #{index} {}", snapshot.id);
                self.pending.push(DeviceSignal::Disconnected(snapshot));
            }
        }

        // Then arrivals and refreshes.
        for (index, snapshot) in seen {
            let is_new = !self.devices.contains_key(&index);
            if is_new {
                #[cfg(feature = "debug-log")]
                eprintln!("[HID/CONNECT] #{index} {}", snapshot.id);
                self.pending.push(DeviceSignal::Connected(snapshot.clone()));
            }
            self.devices.insert(index, snapshot);
        }
    }
}

impl DeviceSource for HidSource {
    fn is_feature_supported(&self, feature: Feature) -> bool {
        match feature {
            Feature::DeviceApi => true,
        }
    }

    fn enumerate(&mut self) -> Vec<DeviceSnapshot> {
        self.devices.values().cloned().collect()
    }

    fn drain_signals(&mut self) -> Vec<DeviceSignal> {
        self.rescan();
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_game_controls_only() {
        assert!(accept_entry(0x01, 0x04, "/dev/hidraw0")); // joystick
        assert!(accept_entry(0x01, 0x05, "/dev/hidraw1")); // gamepad
        assert!(accept_entry(0x01, 0x08, "/dev/hidraw2")); // multi-axis

        assert!(!accept_entry(0x01, 0x02, "/dev/hidraw3")); // mouse
        assert!(!accept_entry(0x01, 0x06, "/dev/hidraw4")); // keyboard
        assert!(!accept_entry(0x0C, 0x01, "/dev/hidraw5")); // consumer page
    }

    #[test]
    fn filter_rejects_xinput_compat_endpoints() {
        assert!(!accept_entry(
            0x01,
            0x05,
            r"\\?\hid#vid_045e&pid_028e&ig_00#8&2d24bd9&0&0000"
        ));
    }
}
