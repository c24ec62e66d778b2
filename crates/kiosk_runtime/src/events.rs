//! Window lifecycle events and the typed listener channel they travel on.
//!
//! Lifecycle events are the sole channel through which the window manager
//! communicates state changes outward; no component polls window state
//! except through explicit query methods.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kiosk_app_contract::WindowId;
use serde::{Deserialize, Serialize};

/// Kind of a window lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowEventKind {
    /// Window was created and registered.
    Open,
    /// Window was removed from the live map.
    Close,
    /// Window gained focus.
    Focus,
    /// Window lost focus.
    Blur,
    /// Window was minimized to the taskbar.
    Minimize,
    /// Window was maximized to the work area.
    Maximize,
    /// Window was restored from minimized or maximized state.
    Restore,
}

impl WindowEventKind {
    /// Stable string token for logging and debugging hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Restore => "restore",
        }
    }
}

/// Lifecycle event emitted by the window manager.
///
/// Events for a given window are strictly ordered: `Open` always precedes
/// any focus/blur/minimize/maximize/restore, which always precede `Close`.
/// Cross-window ordering is unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEvent {
    /// Event kind.
    pub kind: WindowEventKind,
    /// Window the event refers to.
    pub window_id: WindowId,
    /// Monotonic unix millisecond timestamp assigned at emission.
    pub timestamp_unix_ms: u64,
}

impl WindowEvent {
    /// Creates an event stamped with the current monotonic timestamp.
    pub fn now(kind: WindowEventKind, window_id: WindowId) -> Self {
        Self {
            kind,
            window_id,
            timestamp_unix_ms: platform_host::next_monotonic_timestamp_ms(),
        }
    }
}

/// Handle for a registered lifecycle listener, used for symmetric teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Registry of lifecycle listeners, delivered to synchronously in
/// subscription order.
#[derive(Default)]
pub(crate) struct WindowEventListeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, Rc<dyn Fn(&WindowEvent)>)>>,
}

impl WindowEventListeners {
    pub(crate) fn subscribe(&self, listener: Rc<dyn Fn(&WindowEvent)>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(existing, _)| *existing != id);
        entries.len() != before
    }

    pub(crate) fn emit(&self, event: &WindowEvent) {
        // Snapshot the listener list so a handler may query back into the
        // emitting component without observing a held borrow.
        let snapshot: Vec<Rc<dyn Fn(&WindowEvent)>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn listeners_receive_events_in_subscription_order() {
        let listeners = WindowEventListeners::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        listeners.subscribe(Rc::new(move |event: &WindowEvent| {
            first.borrow_mut().push(("first", event.kind));
        }));
        let second = Rc::clone(&seen);
        listeners.subscribe(Rc::new(move |event: &WindowEvent| {
            second.borrow_mut().push(("second", event.kind));
        }));

        listeners.emit(&WindowEvent::now(
            WindowEventKind::Open,
            WindowId::new("probe"),
        ));

        assert_eq!(
            *seen.borrow(),
            vec![("first", WindowEventKind::Open), ("second", WindowEventKind::Open)]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let listeners = WindowEventListeners::default();
        let count = Rc::new(Cell::new(0u32));

        let counter = Rc::clone(&count);
        let id = listeners.subscribe(Rc::new(move |_event: &WindowEvent| {
            counter.set(counter.get() + 1);
        }));

        let event = WindowEvent::now(WindowEventKind::Focus, WindowId::new("probe"));
        listeners.emit(&event);
        assert!(listeners.unsubscribe(id));
        listeners.emit(&event);

        assert_eq!(count.get(), 1);
        assert!(!listeners.unsubscribe(id));
    }

    #[test]
    fn event_timestamps_are_monotonic_per_sequence() {
        let id = WindowId::new("probe");
        let open = WindowEvent::now(WindowEventKind::Open, id.clone());
        let close = WindowEvent::now(WindowEventKind::Close, id);
        assert!(open.timestamp_unix_ms < close.timestamp_unix_ms);
    }
}
