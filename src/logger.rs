//! Stdout event tracing.

use crate::event::{InputEvent, InputKind};
use crate::eventbus::InputListener;

/// A listener that prints every event as a compact line.
///
/// Intended for demos and quick diagnostics; attach it with
/// [`EventFilter::All`](crate::eventbus::EventFilter::All) and watch the
/// stream.
#[derive(Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }
}

impl InputListener for Logger {
    fn on_event(&mut self, event: &InputEvent) {
        match &event.kind {
            InputKind::ButtonPressed { device, button } => {
                println!("pad{device}: +{} ({:.2})", button.index, button.value);
            }
            InputKind::ButtonReleased { device, button } => {
                println!("pad{device}: -{}", button.index);
            }
            InputKind::AxesChanged {
                device,
                stick,
                value,
            } => {
                println!("pad{device}: s{stick}=({:.3},{:.3})", value.x, value.y);
            }
            InputKind::DeviceConnected { devices } => {
                println!("connected: {} device(s) known", devices.len());
            }
            InputKind::DeviceDisconnected { devices } => {
                println!("disconnected: {} device(s) left", devices.len());
            }
        }
    }
}
