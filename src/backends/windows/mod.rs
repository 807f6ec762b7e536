#![cfg(target_os = "windows")]

//! Windows input backends.
//!
//! XInput is the only layout-aware backend on Windows: controller slots are
//! polled directly and surfaced as standard-mapping snapshots. Generic HID
//! discovery (identity and connection signals, no channel decoding) comes
//! from the cross-platform [`hid`](crate::backends::hid) module.

pub mod xinput;
