//! Store actions for connection changes.
//!
//! Besides the event bus, connect/disconnect notifications are forwarded to
//! an application state store as plain serializable `{type, payload}`
//! actions (the flux/redux dispatch shape). The payload is the summary map
//! of every device known after the change, keyed by device index.
//!
//! The store side is entirely the application's: the differ only needs a
//! [`StoreDispatch`] sink, and any `FnMut(Action)` closure qualifies.

use crate::device::DeviceSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connection-change action in `{type, payload}` form.
///
/// Serializes with a `SCREAMING_SNAKE_CASE` type tag:
///
/// ```json
/// {"type": "DEVICE_CONNECTED", "payload": {"devices": {"0": {...}}}}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    DeviceConnected {
        devices: BTreeMap<u16, DeviceSummary>,
    },
    DeviceDisconnected {
        devices: BTreeMap<u16, DeviceSummary>,
    },
}

/// Sink for connection-change actions.
pub trait StoreDispatch: Send {
    fn dispatch(&mut self, action: Action);
}

impl<F> StoreDispatch for F
where
    F: FnMut(Action) + Send,
{
    fn dispatch(&mut self, action: Action) {
        self(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceSnapshot;

    #[test]
    fn action_serializes_as_type_payload() {
        let mut devices = BTreeMap::new();
        devices.insert(0, DeviceSnapshot::new(0, "demo pad").summary());

        let json = serde_json::to_value(&Action::DeviceConnected { devices }).unwrap();
        assert_eq!(json["type"], "DEVICE_CONNECTED");
        assert_eq!(json["payload"]["devices"]["0"]["id"], "demo pad");
        assert_eq!(json["payload"]["devices"]["0"]["mapping"], "none");
        assert_eq!(json["payload"]["devices"]["0"]["connected"], true);
    }

    #[test]
    fn closures_are_dispatch_sinks() {
        let mut count = 0usize;
        {
            let mut sink = |_action: Action| count += 1;
            sink.dispatch(Action::DeviceDisconnected {
                devices: BTreeMap::new(),
            });
        }
        assert_eq!(count, 1);
    }
}
