//! Listener registry and event fan-out.
//!
//! The differ does not inherit an emitter type; it *owns* an [`EventBus`]
//! and routes every synthesized event through it. Listeners register with a
//! coarse [`EventFilter`] and, optionally, a device index so that one
//! consumer can follow a single pad while another watches everything.
//!
//! Connection events describe the whole registry rather than a single
//! device, so a device-scoped listener still receives them.

use crate::event::{InputEvent, InputKind};
use std::collections::HashMap;

/// Trait for reacting to events synthesized by the differ.
pub trait InputListener: Send {
    fn on_event(&mut self, event: &InputEvent);
}

/// Determines which kinds of events a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    AxesOnly,
    ButtonsOnly,
    /// Connect/disconnect notifications only.
    ConnectionOnly,
    Custom(fn(&InputEvent) -> bool),
}

/// Registered listener plus its routing metadata.
struct ListenerEntry {
    listener: Box<dyn InputListener>,
    enabled: bool,
    filter: EventFilter,
    /// When set, only events for this device index are delivered
    /// (connection events always pass).
    device: Option<u16>,
}

pub struct EventBus {
    next_id: u64,
    listeners: HashMap<u64, ListenerEntry>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: HashMap::new(),
        }
    }

    /// Registers a listener with a filter and optional device scope.
    ///
    /// Returns the id used by [`enable`](EventBus::enable) /
    /// [`disable`](EventBus::disable) / [`remove_listener`](EventBus::remove_listener).
    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
        device: Option<u16>,
    ) -> u64 {
        let id = self.next_id;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
                device,
            },
        );
        self.next_id += 1;
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely.
    pub fn remove_listener(&mut self, id: u64) {
        self.listeners.remove(&id);
    }

    /// Emits one event to all active and matching listeners.
    pub fn emit(&mut self, event: &InputEvent) {
        for entry in self.listeners.values_mut() {
            if !entry.enabled {
                continue;
            }

            // Device-scoped listeners skip other devices' events. Connection
            // events have no single device and pass through.
            if let (Some(wanted), Some(device)) = (entry.device, event.kind.device()) {
                if wanted != device {
                    continue;
                }
            }

            let passes_filter = match entry.filter {
                EventFilter::All => true,
                EventFilter::AxesOnly => matches!(event.kind, InputKind::AxesChanged { .. }),
                EventFilter::ButtonsOnly => matches!(
                    event.kind,
                    InputKind::ButtonPressed { .. } | InputKind::ButtonReleased { .. }
                ),
                EventFilter::ConnectionOnly => matches!(
                    event.kind,
                    InputKind::DeviceConnected { .. } | InputKind::DeviceDisconnected { .. }
                ),
                EventFilter::Custom(f) => f(event),
            };

            if passes_filter {
                entry.listener.on_event(event);
            }
        }
    }

    /// Emits a batch of events to matching listeners.
    pub fn emit_all(&mut self, events: &[InputEvent]) {
        for event in events {
            self.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Button;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    struct Capture(Arc<Mutex<Vec<InputKind>>>);

    impl InputListener for Capture {
        fn on_event(&mut self, event: &InputEvent) {
            self.0.lock().unwrap().push(event.kind.clone());
        }
    }

    fn button(device: u16, pressed: bool) -> InputEvent {
        InputEvent::now(InputKind::ButtonPressed {
            device,
            button: Button {
                pressed,
                value: if pressed { 1.0 } else { 0.0 },
                index: 0,
            },
        })
    }

    fn connected() -> InputEvent {
        InputEvent::now(InputKind::DeviceConnected {
            devices: BTreeMap::new(),
        })
    }

    #[test]
    fn filter_routes_by_event_kind() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.add_listener(Capture(seen.clone()), EventFilter::ConnectionOnly, None);

        bus.emit_all(&[button(0, true), connected()]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0], InputKind::DeviceConnected { .. }));
    }

    #[test]
    fn device_scope_passes_connection_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.add_listener(Capture(seen.clone()), EventFilter::All, Some(1));

        bus.emit_all(&[button(0, true), button(1, true), connected()]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].device(), Some(1));
        assert!(matches!(seen[1], InputKind::DeviceConnected { .. }));
    }

    #[test]
    fn disabled_listener_is_muted_not_removed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let id = bus.add_listener(Capture(seen.clone()), EventFilter::All, None);

        bus.disable(id);
        bus.emit(&button(0, true));
        bus.enable(id);
        bus.emit(&button(0, true));

        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
