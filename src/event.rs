//! Events synthesized by the differ.
//!
//! padwatch represents input changes as small, device-tagged deltas
//! ([`InputKind`]) and timestamps them ([`InputEvent`]).
//!
//! ## Trigger semantics
//! The button events are deliberately asymmetric:
//! - [`InputKind::ButtonPressed`] is **level-triggered**: it fires on every
//!   frame the button is held, so consumers can drive continuous behavior
//!   (movement, charging) straight off the event stream.
//! - [`InputKind::ButtonReleased`] is **edge-triggered**: exactly one event
//!   on the frame the release is observed, carrying the post-transition
//!   (not-pressed) button state.
//!
//! [`InputKind::AxesChanged`] is a motion report, not a delta: it fires for
//! every axis pair whose rounded position is away from center, every frame,
//! with no comparison against the previous reading. A stick held off-center
//! therefore re-fires each frame, again so that continuous analog control
//! needs no state on the consumer side.
//!
//! Connection events carry a summary map of *all* devices known at the time
//! of the change, not just the device that changed; see
//! [`DeviceSummary`](crate::device::DeviceSummary) for what is included.

use crate::device::{Button, DeviceSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Rounded 2D position of one axis pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StickVector {
    pub x: f32,
    pub y: f32,
}

/// Per-frame input change, tagged with the reporting device's index.
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// A button is held this frame (level-triggered, fires while held).
    ButtonPressed { device: u16, button: Button },

    /// A button release was observed (edge-triggered, fires once).
    ///
    /// `button` is the post-transition state, i.e. `pressed == false`.
    ButtonReleased { device: u16, button: Button },

    /// An axis pair is away from center this frame.
    ///
    /// `stick` is the zero-based pair ordinal (axes `0/1` are stick 0).
    /// Components are rounded to 3 decimals; an exactly-centered pair is
    /// silent.
    AxesChanged {
        device: u16,
        stick: u16,
        value: StickVector,
    },

    /// A device was added to the registry.
    DeviceConnected {
        devices: BTreeMap<u16, DeviceSummary>,
    },

    /// A device was removed from the registry.
    DeviceDisconnected {
        devices: BTreeMap<u16, DeviceSummary>,
    },
}

impl InputKind {
    /// Index of the single device this event concerns, if any.
    ///
    /// Connection events describe the whole registry and return `None`.
    pub fn device(&self) -> Option<u16> {
        match self {
            InputKind::ButtonPressed { device, .. }
            | InputKind::ButtonReleased { device, .. }
            | InputKind::AxesChanged { device, .. } => Some(*device),
            InputKind::DeviceConnected { .. } | InputKind::DeviceDisconnected { .. } => None,
        }
    }
}

/// Timestamped input event as delivered to listeners.
///
/// A lightweight wrapper over [`InputKind`] with a monotonic capture time,
/// suitable for ordering and delta timing within a run.
#[derive(Clone, Debug)]
pub struct InputEvent {
    /// Capture time (monotonic).
    pub at: Instant,
    /// The actual input change.
    pub kind: InputKind,
}

impl InputEvent {
    /// Wrap a change with the current instant.
    pub fn now(kind: InputKind) -> Self {
        Self {
            at: Instant::now(),
            kind,
        }
    }
}
