//! The frame-driven input differ.
//!
//! [`InputDiffer`] owns the device [`Registry`](crate::registry::Registry)
//! and, once per frame, compares every device's current readings against the
//! previously recorded ones, synthesizing discrete events on transitions.
//! It is a leaf component: a frame scheduler calls
//! [`update`](InputDiffer::update), and application code consumes the
//! resulting events through the bus or the store dispatch.
//!
//! # Error posture
//! Nothing escapes `update()`. A source with a shrunken or malformed frame,
//! a device that vanished between scan and diff, a missing capability: all
//! degrade to "no event for that channel/device/frame". A single bad frame
//! must never take the frame loop down with it.
//!
//! # Threading
//! Single-threaded and cooperative. `update()` does in-memory comparisons
//! and synchronous dispatch only; sources guarantee non-blocking
//! enumeration. Connection signals queued by the source between frames are
//! delivered at the top of `update()`, before the diff pass; this is the
//! ordering a platform callback firing between two frames would produce.

use crate::action::{Action, StoreDispatch};
use crate::device::{
    normalize_button, DeviceSignal, DeviceSnapshot, DeviceSource, Feature,
};
use crate::event::{InputEvent, InputKind, StickVector};
use crate::eventbus::{EventBus, EventFilter, InputListener};
use crate::registry::Registry;
use std::time::Instant;

/// Round an axis reading to 3 decimal places.
///
/// Mode: scale by 1000, [`f32::round`] (ties round away from zero), unscale.
/// This is the threshold the differ uses to decide whether a pair is away
/// from center: anything inside ±0.0005 rounds to zero and stays silent.
/// Note the away-from-zero ties, so `-0.4995` lands on `-0.5`.
pub fn round_axis(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Polls a device source once per frame and synthesizes input events.
///
/// See the [module docs](self) for the frame contract, and
/// [`event`](crate::event) for the trigger semantics of each event kind.
pub struct InputDiffer<S: DeviceSource> {
    source: S,
    enabled: bool,
    registry: Registry,
    bus: EventBus,
    store: Option<Box<dyn StoreDispatch>>,
}

impl<S: DeviceSource> InputDiffer<S> {
    /// A disabled differ over `source`, with an empty registry.
    pub fn new(source: S) -> Self {
        Self {
            source,
            enabled: false,
            registry: Registry::new(),
            bus: EventBus::new(),
            store: None,
        }
    }

    /// Forward connection actions to an application state store.
    pub fn set_store(&mut self, store: Box<dyn StoreDispatch>) {
        self.store = Some(store);
    }

    /// Registers an event listener. Delegates to [`EventBus::add_listener`].
    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
        device: Option<u16>,
    ) -> u64 {
        self.bus.add_listener(listener, filter, device)
    }

    /// Unregisters an event listener.
    pub fn remove_listener(&mut self, id: u64) {
        self.bus.remove_listener(id);
    }

    /// The owned bus, for listener enable/disable and direct emission.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// The underlying source. Mostly useful for scripted sources in tests
    /// and demos.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Last-observed device state.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Start watching the source.
    ///
    /// If the source does not support [`Feature::DeviceApi`] this is a
    /// silent no-op: capability absence is a supported degraded mode, not an
    /// error, and every later `update()` stays a no-op too.
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        if !self.source.is_feature_supported(Feature::DeviceApi) {
            #[cfg(feature = "debug-log")]
            eprintln!("[DIFFER] device API unavailable, staying disabled");
            return;
        }
        // Signals raised while nobody was subscribed are stale; drop them
        // so a re-enabled differ starts from a clean baseline.
        let _ = self.source.drain_signals();
        self.enabled = true;
    }

    /// Stop watching and clear the registry. Idempotent.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.registry.clear();
    }

    /// One frame: deliver queued connection signals, refresh the registry,
    /// diff every device against its previous snapshot, emit.
    ///
    /// A device first seen this frame has no previous snapshot and is
    /// baseline-only: it gets diffed starting next frame.
    pub fn update(&mut self) {
        if !self.enabled {
            return;
        }

        for signal in self.source.drain_signals() {
            match signal {
                DeviceSignal::Connected(snapshot) => self.on_device_connected(snapshot),
                DeviceSignal::Disconnected(snapshot) => self.on_device_disconnected(&snapshot),
            }
        }

        let previous = self.registry.clone();
        for snapshot in self.source.enumerate() {
            self.registry.insert(snapshot);
        }

        let mut changes = Vec::new();
        for (&index, current) in self.registry.iter() {
            // No previous entry: connected mid-update, baseline established
            // now, diffed starting next frame.
            if let Some(prev) = previous.get(index) {
                Self::evaluate_buttons(prev, current, &mut changes);
                Self::evaluate_axes(current, &mut changes);
            }
        }

        if changes.is_empty() {
            return;
        }
        let at = Instant::now();
        let events: Vec<InputEvent> = changes
            .into_iter()
            .map(|kind| InputEvent { at, kind })
            .collect();
        self.bus.emit_all(&events);
    }

    /// Platform signal: a device was connected.
    ///
    /// Adds the device to the registry, then emits a
    /// [`DeviceConnected`](InputKind::DeviceConnected) event and forwards the
    /// matching [`Action`] to the store. The payload summarizes every device
    /// known after the addition. A disabled differ is not subscribed to
    /// signals, so this is a no-op until [`enable`](InputDiffer::enable).
    pub fn on_device_connected(&mut self, device: DeviceSnapshot) {
        if !self.enabled {
            return;
        }
        self.registry.insert(device);
        self.notify_connection(true);
    }

    /// Platform signal: a device was disconnected.
    ///
    /// Removes the device from the registry; the following `update()` simply
    /// has nothing left to diff for that index.
    pub fn on_device_disconnected(&mut self, device: &DeviceSnapshot) {
        if !self.enabled {
            return;
        }
        self.registry.remove(device.index);
        self.notify_connection(false);
    }

    fn notify_connection(&mut self, connected: bool) {
        let devices = self.registry.summaries();

        let kind = if connected {
            InputKind::DeviceConnected {
                devices: devices.clone(),
            }
        } else {
            InputKind::DeviceDisconnected {
                devices: devices.clone(),
            }
        };
        self.bus.emit(&InputEvent::now(kind));

        if let Some(store) = self.store.as_mut() {
            let action = if connected {
                Action::DeviceConnected { devices }
            } else {
                Action::DeviceDisconnected { devices }
            };
            store.dispatch(action);
        }
    }

    /// Button pass: level-triggered pressed, edge-triggered released.
    ///
    /// Indexing into the previous frame is checked: a device that now
    /// reports more buttons than before has no release edge to detect for
    /// the new channels.
    fn evaluate_buttons(prev: &DeviceSnapshot, current: &DeviceSnapshot, out: &mut Vec<InputKind>) {
        for (i, raw) in current.buttons.iter().enumerate() {
            let index = i as u16;
            let button = normalize_button(raw, index);

            if button.pressed {
                out.push(InputKind::ButtonPressed {
                    device: current.index,
                    button,
                });
            } else {
                let was_pressed = prev
                    .buttons
                    .get(i)
                    .map(|raw| normalize_button(raw, index).pressed)
                    .unwrap_or(false);
                if was_pressed {
                    // Carries the post-transition (not-pressed) state.
                    out.push(InputKind::ButtonReleased {
                        device: current.index,
                        button,
                    });
                }
            }
        }
    }

    /// Axis pass: motion-threshold check against center, current frame only.
    ///
    /// `chunks_exact(2)` leaves a trailing odd axis unpaired and unreported.
    fn evaluate_axes(current: &DeviceSnapshot, out: &mut Vec<InputKind>) {
        for (stick, pair) in current.axes.chunks_exact(2).enumerate() {
            let x = round_axis(pair[0]);
            let y = round_axis(pair[1]);

            if x != 0.0 || y != 0.0 {
                out.push(InputKind::AxesChanged {
                    device: current.index,
                    stick: stick as u16,
                    value: StickVector { x, y },
                });
            }
        }
    }
}
