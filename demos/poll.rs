use padwatch::{backends, EventFilter, InputDiffer, Logger};
use std::time::Duration;

fn main() {
    let mut differ = InputDiffer::new(backends::probe_source());
    differ.add_listener(Logger::new(), EventFilter::All, None);
    differ.enable();

    if !differ.is_enabled() {
        eprintln!("no device API available on this platform");
        return;
    }

    // Held buttons and off-center sticks re-fire every frame by design, so
    // expect a steady stream while you touch the pad.
    println!("watching for devices (ctrl-c to quit)");
    loop {
        differ.update();
        // ~60 Hz; keeps CPU usage sane in the demo
        std::thread::sleep(Duration::from_millis(16));
    }
}
