//! Device snapshots and the source abstraction.
//!
//! A [`DeviceSnapshot`] is the raw, per-poll view of one input device as the
//! platform reports it: identity, connection state, and ordered button/axis
//! channel readings. Snapshots are plain data; producing events out of two
//! snapshots is the differ's job, not the device's.
//!
//! ## Value conventions
//! - **Axes:** normalized to `[-1.0, 1.0]`. Axes come in pairs: indices `0/1`
//!   form stick 0, `2/3` stick 1, and so on. A trailing odd axis belongs to
//!   no pair and is ignored by pair-based consumers.
//! - **Buttons:** reported either as a bare magnitude or as a structured
//!   record (see [`RawButton`]); both normalize through [`normalize_button`].
//! - **Timestamps:** device-supplied, monotonically increasing per poll.
//!   Units are backend-specific (packet counters, scan counters, ...); only
//!   ordering is meaningful.

use serde::{Deserialize, Serialize};

/// Expected channel layout of a device.
///
/// `Standard` promises the conventional gamepad layout (face buttons first,
/// triggers at 6/7, stick 0 on axes 0/1). Backends that cannot vouch for a
/// layout report `None` and leave interpretation to the application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mapping {
    Standard,
    #[default]
    None,
}

/// A button reading as it comes off the wire.
///
/// Upstream sources are not uniform: some report a bare magnitude per button,
/// others a full record. Both shapes deserialize into this one type
/// (untagged), and both normalize to [`Button`] through [`normalize_button`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawButton {
    /// Bare magnitude in `[0, 1]`. Counts as pressed only at exactly `1.0`.
    Scalar(f32),
    /// Structured reading carrying an explicit pressed flag.
    Struct { pressed: bool, value: f32 },
}

/// Canonical button state, after normalization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Button {
    /// Whether the button currently counts as pressed.
    pub pressed: bool,
    /// Analog magnitude in `[0, 1]`.
    pub value: f32,
    /// Position within the device's button sequence.
    pub index: u16,
}

/// Normalize a raw reading into a canonical [`Button`].
///
/// A [`RawButton::Scalar`] is pressed only at full magnitude (`value ==
/// 1.0`); partial pulls stay analog-only. Structured readings pass through
/// unchanged.
pub fn normalize_button(raw: &RawButton, index: u16) -> Button {
    match *raw {
        RawButton::Scalar(value) => Button {
            pressed: value == 1.0,
            value,
            index,
        },
        RawButton::Struct { pressed, value } => Button {
            pressed,
            value,
            index,
        },
    }
}

/// Per-poll view of one connected device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Stable device index assigned by the source.
    pub index: u16,
    /// Connection state as of this poll.
    pub connected: bool,
    /// Device-supplied monotonic poll timestamp (backend-specific units).
    pub timestamp: f64,
    /// Opaque descriptor string, e.g. `"XInput Controller 0 (Vendor: 045e Product: 028e)"`.
    pub id: String,
    /// Expected channel layout.
    pub mapping: Mapping,
    /// Ordered button readings.
    pub buttons: Vec<RawButton>,
    /// Ordered axis readings, normalized to `[-1.0, 1.0]`.
    pub axes: Vec<f32>,
}

impl DeviceSnapshot {
    /// A connected, at-rest snapshot with no channels.
    ///
    /// Handy as a struct-update base when building snapshots by hand:
    ///
    /// ```
    /// use padwatch::device::{DeviceSnapshot, RawButton};
    ///
    /// let pad = DeviceSnapshot {
    ///     buttons: vec![RawButton::Scalar(0.0)],
    ///     axes: vec![0.0, 0.0],
    ///     ..DeviceSnapshot::new(0, "demo pad")
    /// };
    /// assert!(pad.connected);
    /// ```
    pub fn new(index: u16, id: impl Into<String>) -> Self {
        Self {
            index,
            connected: true,
            timestamp: 0.0,
            id: id.into(),
            mapping: Mapping::None,
            buttons: Vec::new(),
            axes: Vec::new(),
        }
    }

    /// Lightweight projection for connect/disconnect payloads.
    pub fn summary(&self) -> DeviceSummary {
        DeviceSummary {
            index: self.index,
            connected: self.connected,
            timestamp: self.timestamp,
            id: self.id.clone(),
            mapping: self.mapping,
        }
    }
}

/// Identity-and-state summary of a device, without channel data.
///
/// This is what connect/disconnect notifications carry: enough to list and
/// re-identify devices, deliberately excluding the bulky per-frame
/// button/axis readings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub index: u16,
    pub connected: bool,
    pub timestamp: f64,
    pub id: String,
    pub mapping: Mapping,
}

/// Platform capabilities a source can be asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Device enumeration plus connect/disconnect signals.
    DeviceApi,
}

/// Connect/disconnect signal raised by a source.
#[derive(Clone, Debug)]
pub enum DeviceSignal {
    Connected(DeviceSnapshot),
    Disconnected(DeviceSnapshot),
}

/// A platform input source: enumerable devices plus connection signals.
///
/// Implementations live in [`backends`](crate::backends). All methods are
/// synchronous and must not block: sources are queried from inside a frame
/// loop.
///
/// # Per-frame contract
/// [`drain_signals`](DeviceSource::drain_signals) is the scan point: a source
/// refreshes its view of the platform there and hands back any
/// connect/disconnect signals raised since the previous drain.
/// [`enumerate`](DeviceSource::enumerate) reports the connected devices as of
/// the most recent scan. [`InputDiffer::update`](crate::differ::InputDiffer::update)
/// drains before enumerating, once per frame.
pub trait DeviceSource {
    /// Capability probe. Sources that cannot deliver a capability must say
    /// so here rather than failing later.
    fn is_feature_supported(&self, feature: Feature) -> bool;

    /// Current snapshot of every connected device.
    fn enumerate(&mut self) -> Vec<DeviceSnapshot>;

    /// Connect/disconnect signals raised since the last drain.
    fn drain_signals(&mut self) -> Vec<DeviceSignal>;
}

impl DeviceSource for Box<dyn DeviceSource> {
    fn is_feature_supported(&self, feature: Feature) -> bool {
        (**self).is_feature_supported(feature)
    }

    fn enumerate(&mut self) -> Vec<DeviceSnapshot> {
        (**self).enumerate()
    }

    fn drain_signals(&mut self) -> Vec<DeviceSignal> {
        (**self).drain_signals()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_pressed_only_at_full_magnitude() {
        let full = normalize_button(&RawButton::Scalar(1.0), 0);
        assert!(full.pressed);
        assert_eq!(full.value, 1.0);

        let partial = normalize_button(&RawButton::Scalar(0.7), 0);
        assert!(!partial.pressed);
        assert_eq!(partial.value, 0.7);

        let rest = normalize_button(&RawButton::Scalar(0.0), 3);
        assert!(!rest.pressed);
        assert_eq!(rest.index, 3);
    }

    #[test]
    fn struct_reading_passes_through() {
        // A structured record may be pressed at partial magnitude; the
        // normalizer must not second-guess it.
        let halfway = normalize_button(
            &RawButton::Struct {
                pressed: true,
                value: 0.5,
            },
            2,
        );
        assert!(halfway.pressed);
        assert_eq!(halfway.value, 0.5);
        assert_eq!(halfway.index, 2);
    }

    #[test]
    fn raw_button_deserializes_both_wire_shapes() {
        let scalar: RawButton = serde_json::from_str("0.25").unwrap();
        assert_eq!(scalar, RawButton::Scalar(0.25));

        let record: RawButton = serde_json::from_str(r#"{"pressed": true, "value": 1.0}"#).unwrap();
        assert_eq!(
            record,
            RawButton::Struct {
                pressed: true,
                value: 1.0
            }
        );
    }

    #[test]
    fn summary_excludes_channel_data() {
        let snap = DeviceSnapshot {
            buttons: vec![RawButton::Scalar(1.0)],
            axes: vec![0.2, -0.3],
            ..DeviceSnapshot::new(1, "demo pad")
        };
        let summary = snap.summary();
        assert_eq!(summary.index, 1);
        assert_eq!(summary.id, "demo pad");
        // Summaries serialize without buttons/axes keys at all.
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("buttons").is_none());
        assert!(json.get("axes").is_none());
    }
}
