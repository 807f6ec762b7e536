//! Input backends for `padwatch`.
//!
//! Implementations of [`DeviceSource`](crate::device::DeviceSource) for
//! platform-specific input APIs, plus the scriptable
//! [`virtual_input`](virtual_input) source.
//!
//! # Feature flags
//! - **`hid`** — enables the hidapi discovery backend (default).
//! - **`debug-log`** — per-backend diagnostic lines on stderr.
//!
//! padwatch reads input devices; it does not create virtual devices
//! (vJoy/uinput).

use crate::device::DeviceSource;
use thiserror::Error;

pub mod virtual_input;

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub mod windows;

/// Failure to bring up a platform backend.
///
/// Backends only fail at construction/refresh time; once a source is
/// handed to the differ, everything degrades to "no devices" instead of
/// erroring (see [`differ`](crate::differ)).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("hidapi initialization failed: {0}")]
    HidInit(#[from] hidapi::HidError),
}

/// Best available source for the current platform.
///
/// Windows gets the layout-aware XInput backend; elsewhere HID discovery is
/// used when the `hid` feature is on. Falls back to an empty
/// [`VirtualSource`](virtual_input::VirtualSource) so callers always get a
/// working (if deviceless) source.
pub fn probe_source() -> Box<dyn DeviceSource> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::xinput::XInputSource::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        #[cfg(feature = "hid")]
        match hid::HidSource::new() {
            Ok(source) => return Box::new(source),
            Err(_err) => {
                #[cfg(feature = "debug-log")]
                eprintln!("[BACKENDS] hid unavailable: {_err}");
            }
        }

        Box::new(virtual_input::VirtualSource::new())
    }
}
