//! padwatch — frame-driven input device differ.
//!
//! Polls a set of input devices once per frame, compares each device's
//! current state against the previously recorded snapshot, and emits
//! discrete events only on transitions: press, release, axis motion,
//! connect, disconnect. Backends supply the snapshots (XInput, HID
//! discovery, scripted virtual devices); the differ supplies the events.
//!
//! ```no_run
//! use padwatch::{backends, EventFilter, InputDiffer, Logger};
//!
//! let mut differ = InputDiffer::new(backends::probe_source());
//! differ.add_listener(Logger::new(), EventFilter::All, None);
//! differ.enable();
//!
//! loop {
//!     differ.update(); // once per frame
//!     # break;
//! }
//! ```

pub mod action;
pub mod backends;
pub mod device;
pub mod differ;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod logger;
pub mod registry;

pub use action::*;
pub use device::*;
pub use differ::*;
pub use event::*;
pub use eventbus::*;
pub use filtered_listener::*;
pub use logger::*;
pub use registry::*;
