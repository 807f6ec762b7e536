//! Predicate-based listener wrapper.

use crate::event::InputEvent;
use crate::eventbus::InputListener;

/// Wraps a listener and forwards only events matching a caller-supplied
/// predicate, for conditions [`EventFilter`](crate::eventbus::EventFilter)
/// cannot express, like value thresholds.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&InputEvent) -> bool + Send + Sync>,
    inner: Box<dyn InputListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&InputEvent) -> bool + Send + Sync + 'static,
        inner: Box<dyn InputListener>,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner,
        }
    }
}

impl InputListener for FilteredListener {
    fn on_event(&mut self, event: &InputEvent) {
        if (self.predicate)(event) {
            self.inner.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InputKind;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    struct Count(Arc<Mutex<usize>>);

    impl InputListener for Count {
        fn on_event(&mut self, _event: &InputEvent) {
            *self.0.lock().unwrap() += 1;
        }
    }

    #[test]
    fn predicate_gates_delivery() {
        let count = Arc::new(Mutex::new(0));
        let mut filtered = FilteredListener::new(
            |event| matches!(event.kind, InputKind::DeviceConnected { .. }),
            Box::new(Count(count.clone())),
        );

        filtered.on_event(&InputEvent::now(InputKind::DeviceConnected {
            devices: BTreeMap::new(),
        }));
        filtered.on_event(&InputEvent::now(InputKind::DeviceDisconnected {
            devices: BTreeMap::new(),
        }));

        assert_eq!(*count.lock().unwrap(), 1);
    }
}
