use padwatch::backends::virtual_input::VirtualSource;
use padwatch::{
    Action, DeviceSnapshot, EventFilter, InputDiffer, Logger, Mapping, RawButton,
};

fn main() {
    let mut differ = InputDiffer::new(VirtualSource::new());
    differ.add_listener(Logger::new(), EventFilter::All, None);
    differ.set_store(Box::new(|action: Action| {
        println!("store <- {}", serde_json::to_string(&action).unwrap());
    }));
    differ.enable();

    let pad = DeviceSnapshot {
        mapping: Mapping::Standard,
        buttons: vec![RawButton::Scalar(0.0), RawButton::Scalar(0.0)],
        axes: vec![0.0, 0.0],
        ..DeviceSnapshot::new(0, "Virtual Pad (Vendor: 0000 Product: 0001)")
    };
    differ.source_mut().connect(pad.clone());
    differ.update();

    // Hold button 1 with the stick off-center for three frames. Pressed is
    // level-triggered, so expect three press lines and three axis lines.
    let held = DeviceSnapshot {
        buttons: vec![RawButton::Scalar(0.0), RawButton::Scalar(1.0)],
        axes: vec![0.25, -0.5],
        ..pad.clone()
    };
    differ.source_mut().set_state(held);
    for _ in 0..3 {
        differ.update();
    }

    // Let go: one release line, then silence.
    differ.source_mut().set_state(pad);
    differ.update();
    differ.update();

    differ.source_mut().disconnect(0);
    differ.update();
}
