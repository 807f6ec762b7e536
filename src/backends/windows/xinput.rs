#![cfg(target_os = "windows")]

//! Windows XInput source.
//!
//! Polls controller slots 0–3 through `XInputGetState` and exposes them as
//! standard-mapping [`DeviceSnapshot`]s. XInput is the preferred path for
//! Xbox-style pads on Windows: slot polling is stable and cheap enough to
//! run every frame, the layout is known, and it avoids double-reading the
//! HID compatibility endpoints (which the HID backend filters out on its
//! side).
//!
//! ## Channel conventions (standard mapping)
//! Buttons, in order: `A B X Y LB RB LT RT Back Start LThumb RThumb
//! DPadUp DPadDown DPadLeft DPadRight` (indices 0..=15). The triggers at
//! 6/7 are reported as bare magnitudes in `[0, 1]`
//! ([`RawButton::Scalar`]), so they count as pressed only at full pull and
//! stay analog otherwise. All other buttons are structured readings.
//!
//! Axes: `LX LY RX RY` normalized to `[-1.0, 1.0]`, Y inverted so up is
//! `-1`; stick 0 sits on axes 0/1, stick 1 on axes 2/3.
//!
//! `dwPacketNumber` serves as the device-supplied monotonic timestamp: it
//! increases whenever the controller state changes.

use crate::device::{DeviceSignal, DeviceSnapshot, DeviceSource, Feature, Mapping, RawButton};

// Windows XInput FFI.
use windows_sys::Win32::UI::Input::XboxController::*;

/// XInput slot count (fixed by the API).
const SLOTS: u32 = 4;

/// Buttons reported by the standard mapping.
const BUTTON_COUNT: usize = 16;

/// XInput button bit → standard-mapping button index.
///
/// Triggers (6/7) are not in this table; they come from the analog trigger
/// bytes instead.
const DIGITAL_BUTTONS: &[(u16, usize)] = &[
    (XINPUT_GAMEPAD_A, 0),
    (XINPUT_GAMEPAD_B, 1),
    (XINPUT_GAMEPAD_X, 2),
    (XINPUT_GAMEPAD_Y, 3),
    (XINPUT_GAMEPAD_LEFT_SHOULDER, 4),
    (XINPUT_GAMEPAD_RIGHT_SHOULDER, 5),
    (XINPUT_GAMEPAD_BACK, 8),
    (XINPUT_GAMEPAD_START, 9),
    (XINPUT_GAMEPAD_LEFT_THUMB, 10),
    (XINPUT_GAMEPAD_RIGHT_THUMB, 11),
    (XINPUT_GAMEPAD_DPAD_UP, 12),
    (XINPUT_GAMEPAD_DPAD_DOWN, 13),
    (XINPUT_GAMEPAD_DPAD_LEFT, 14),
    (XINPUT_GAMEPAD_DPAD_RIGHT, 15),
];

#[inline]
/// Normalize a signed thumbstick axis into `[-1, 1]`.
fn normalize_thumb(v: i16) -> f32 {
    // Map [-32768, 32767] -> [-1, 1]
    if v >= 0 {
        (v as f32) / 32767.0
    } else {
        (v as f32) / 32768.0
    }
}

#[inline]
/// Trigger byte (`0..255`) as a bare magnitude in `[0, 1]`.
fn trigger_value(v: u8) -> f32 {
    (v as f32) / 255.0
}

fn snapshot_from_state(slot: u32, state: &XINPUT_STATE) -> DeviceSnapshot {
    let gp = &state.Gamepad;

    let mut buttons = vec![
        RawButton::Struct {
            pressed: false,
            value: 0.0,
        };
        BUTTON_COUNT
    ];
    for &(mask, index) in DIGITAL_BUTTONS {
        let pressed = gp.wButtons & mask != 0;
        buttons[index] = RawButton::Struct {
            pressed,
            value: if pressed { 1.0 } else { 0.0 },
        };
    }
    buttons[6] = RawButton::Scalar(trigger_value(gp.bLeftTrigger));
    buttons[7] = RawButton::Scalar(trigger_value(gp.bRightTrigger));

    let axes = vec![
        normalize_thumb(gp.sThumbLX),
        // Invert so up = -1, matching the axis convention in `device`.
        -normalize_thumb(gp.sThumbLY),
        normalize_thumb(gp.sThumbRX),
        -normalize_thumb(gp.sThumbRY),
    ];

    DeviceSnapshot {
        index: slot as u16,
        connected: true,
        timestamp: state.dwPacketNumber as f64,
        id: format!("XInput Controller {slot} (Vendor: 045e Product: 028e)"),
        mapping: Mapping::Standard,
        buttons,
        axes,
    }
}

/// Slot-polling XInput source.
#[derive(Default)]
pub struct XInputSource {
    snapshots: [Option<DeviceSnapshot>; SLOTS as usize],
    pending: Vec<DeviceSignal>,
}

impl XInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll every slot, refresh snapshots, queue signals for slots that
    /// appeared or went away.
    fn scan(&mut self) {
        for slot in 0..SLOTS {
            // FFI struct: must be manually zeroed
            let mut state: XINPUT_STATE = unsafe { std::mem::zeroed() };

            // NOTE: XInputGetState returns 0 on success.
            let res = unsafe { XInputGetState(slot, &mut state) };

            if res != 0 {
                // Disconnected or empty slot.
                if let Some(mut old) = self.snapshots[slot as usize].take() {
                    old.connected = false;
                    #[cfg(feature = "debug-log")]
                    eprintln!("[XINPUT/DISCONNECT] slot={slot}");
                    self.pending.push(DeviceSignal::Disconnected(old));
                }
                continue;
            }

            let snapshot = snapshot_from_state(slot, &state);
            if self.snapshots[slot as usize].is_none() {
                #[cfg(feature = "debug-log")]
                eprintln!("[XINPUT/CONNECT] slot={slot} id={}", snapshot.id);
                self.pending.push(DeviceSignal::Connected(snapshot.clone()));
            }
            self.snapshots[slot as usize] = Some(snapshot);
        }
    }
}

impl DeviceSource for XInputSource {
    fn is_feature_supported(&self, feature: Feature) -> bool {
        match feature {
            Feature::DeviceApi => true,
        }
    }

    fn enumerate(&mut self) -> Vec<DeviceSnapshot> {
        self.snapshots.iter().flatten().cloned().collect()
    }

    fn drain_signals(&mut self) -> Vec<DeviceSignal> {
        self.scan();
        std::mem::take(&mut self.pending)
    }
}
