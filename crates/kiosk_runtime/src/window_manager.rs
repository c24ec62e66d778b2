//! Window ownership, placement, and lifecycle transitions.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use kiosk_app_contract::{
    SurfaceHandle, SurfaceIntent, WindowConfig, WindowEngine, WindowFlags, WindowId, WindowMinSize,
    WindowRect,
};
use serde::{Deserialize, Serialize};

use crate::events::{ListenerId, WindowEvent, WindowEventKind, WindowEventListeners};

/// Height of the band reserved for the taskbar at the top of the viewport.
pub const TASKBAR_BAND_HEIGHT: i32 = 28;
/// Offset applied to each successive cascaded window.
pub const CASCADE_STEP: i32 = 24;
/// Number of cascade positions before placement wraps around.
const CASCADE_SLOTS: u64 = 8;

/// Point-in-time view of a managed window, returned by query methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    /// Window id.
    pub id: WindowId,
    /// Current title.
    pub title: String,
    /// Optional icon tag.
    pub icon_id: Option<String>,
    /// Current geometry.
    pub rect: WindowRect,
    /// Geometry to restore to after a maximize.
    pub restore_rect: Option<WindowRect>,
    /// Behavioral flags.
    pub flags: WindowFlags,
    /// Whether the window is minimized.
    pub minimized: bool,
    /// Whether the window is maximized.
    pub maximized: bool,
    /// Whether the window holds focus.
    pub focused: bool,
}

struct WindowRecord {
    id: WindowId,
    title: String,
    icon_id: Option<String>,
    rect: WindowRect,
    restore_rect: Option<WindowRect>,
    min_size: WindowMinSize,
    flags: WindowFlags,
    surface: SurfaceHandle,
    minimized: bool,
    maximized: bool,
    focused: bool,
}

impl WindowRecord {
    fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            icon_id: self.icon_id.clone(),
            rect: self.rect,
            restore_rect: self.restore_rect,
            flags: self.flags,
            minimized: self.minimized,
            maximized: self.maximized,
            focused: self.focused,
        }
    }
}

#[derive(Default)]
struct WmState {
    windows: Vec<WindowRecord>,
    next_synthetic: u64,
    cascade_slot: u64,
}

/// Exclusive owner of the window-id to window-instance mapping.
///
/// All state changes flow outward through [`WindowEvent`] values emitted
/// synchronously after the visual transition completes; components other
/// than the orchestrator must not reach into the live map.
pub struct WindowManager {
    engine: Rc<dyn WindowEngine>,
    viewport: WindowRect,
    state: RefCell<WmState>,
    listeners: WindowEventListeners,
    weak: Weak<WindowManager>,
}

impl WindowManager {
    /// Creates a manager placing windows inside `viewport`, realized by
    /// `engine`.
    pub fn new(engine: Rc<dyn WindowEngine>, viewport: WindowRect) -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            engine,
            viewport,
            state: RefCell::new(WmState {
                next_synthetic: 1,
                ..WmState::default()
            }),
            listeners: WindowEventListeners::default(),
            weak: weak.clone(),
        })
    }

    /// Registers a lifecycle listener; the returned id is used for
    /// symmetric teardown.
    pub fn subscribe(&self, listener: Rc<dyn Fn(&WindowEvent)>) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Removes a previously registered listener.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Creates a window from `config` and returns its id.
    ///
    /// If a live window already carries the same id this is an idempotent
    /// focus-and-return: the existing window is raised, no duplicate `Open`
    /// event fires, and the later configuration is silently discarded (the
    /// singleton-window-per-id idiom). Otherwise the window is placed at the
    /// next cascade position unless the config carries explicit geometry,
    /// clamped to the viewport minus the taskbar band, mounted on the
    /// engine, and announced with `Open` followed by `Focus`.
    pub fn create_window(&self, config: WindowConfig) -> WindowId {
        let id = match config.id.clone() {
            Some(id) => id,
            None => self.next_synthetic_id(),
        };
        if self.has_window(&id) {
            self.focus_window(&id);
            return id;
        }

        let rect = {
            let mut state = self.state.borrow_mut();
            let advisory = match config.rect {
                Some(rect) => rect,
                None => {
                    // Explicitly placed windows do not consume a cascade
                    // slot.
                    let slot = state.cascade_slot;
                    state.cascade_slot += 1;
                    self.cascade_rect(slot)
                }
            };
            self.clamp_to_work_area(advisory, config.min_size)
        };

        let intents = self.surface_intent_handler(id.clone());
        let surface = self.engine.mount(&config, rect, intents);

        let previous_focus = {
            let mut state = self.state.borrow_mut();
            let previous = state.windows.iter_mut().find(|w| w.focused).map(|w| {
                w.focused = false;
                w.id.clone()
            });
            state.windows.push(WindowRecord {
                id: id.clone(),
                title: config.title,
                icon_id: config.icon_id,
                rect,
                restore_rect: None,
                min_size: config.min_size,
                flags: config.flags,
                surface,
                minimized: false,
                maximized: false,
                focused: true,
            });
            previous
        };

        self.emit(WindowEventKind::Open, &id);
        if let Some(previous) = previous_focus {
            self.emit(WindowEventKind::Blur, &previous);
        }
        self.emit(WindowEventKind::Focus, &id);
        id
    }

    /// Focuses and raises a window.
    ///
    /// Returns `false` for an unknown id. Focusing the already-focused,
    /// non-minimized window is an idempotent no-op that emits no events.
    /// Callers must restore a minimized window before focusing it;
    /// focusing while minimized leaves the minimized flag untouched.
    pub fn focus_window(&self, id: &WindowId) -> bool {
        let (surface, previous_focus) = {
            let mut state = self.state.borrow_mut();
            let Some(index) = state.windows.iter().position(|w| w.id == *id) else {
                return false;
            };
            if state.windows[index].focused && !state.windows[index].minimized {
                return true;
            }
            let previous = state
                .windows
                .iter_mut()
                .filter(|w| w.focused && w.id != *id)
                .map(|w| {
                    w.focused = false;
                    w.id.clone()
                })
                .next();
            state.windows[index].focused = true;
            (state.windows[index].surface, previous)
        };

        self.engine.raise(surface);
        if let Some(previous) = previous_focus {
            self.emit(WindowEventKind::Blur, &previous);
        }
        self.emit(WindowEventKind::Focus, id);
        true
    }

    /// Minimizes a window to the taskbar.
    ///
    /// Returns `false` when the id is unknown or the window's flags forbid
    /// minimizing; otherwise emits `Minimize` exactly once.
    pub fn minimize_window(&self, id: &WindowId) -> bool {
        let surface = {
            let mut state = self.state.borrow_mut();
            let Some(window) = state.windows.iter_mut().find(|w| w.id == *id) else {
                return false;
            };
            if !window.flags.minimizable {
                log::debug!("window `{id}` is not minimizable");
                return false;
            }
            window.minimized = true;
            window.focused = false;
            window.surface
        };

        self.engine.minimize(surface);
        self.emit(WindowEventKind::Minimize, id);
        true
    }

    /// Maximizes a window to the work area.
    ///
    /// Returns `false` when the id is unknown or the window's flags forbid
    /// maximizing; otherwise emits `Maximize` exactly once.
    pub fn maximize_window(&self, id: &WindowId) -> bool {
        let (surface, rect) = {
            let mut state = self.state.borrow_mut();
            let Some(window) = state.windows.iter_mut().find(|w| w.id == *id) else {
                return false;
            };
            if !window.flags.maximizable {
                log::debug!("window `{id}` is not maximizable");
                return false;
            }
            if !window.maximized {
                window.restore_rect = Some(window.rect);
            }
            let work = self.work_area();
            window.rect = work.clamped_min(window.min_size.w, window.min_size.h);
            window.maximized = true;
            window.minimized = false;
            (window.surface, window.rect)
        };

        self.engine.maximize(surface, rect);
        self.emit(WindowEventKind::Maximize, id);
        true
    }

    /// Restores a window from minimized and/or maximized state.
    ///
    /// Returns `false` for an unknown id; otherwise emits `Restore`
    /// exactly once.
    pub fn restore_window(&self, id: &WindowId) -> bool {
        let (surface, rect) = {
            let mut state = self.state.borrow_mut();
            let Some(window) = state.windows.iter_mut().find(|w| w.id == *id) else {
                return false;
            };
            if window.maximized {
                if let Some(restore_rect) = window.restore_rect.take() {
                    window.rect = restore_rect;
                }
                window.maximized = false;
            }
            window.minimized = false;
            (window.surface, window.rect)
        };

        self.engine.restore(surface, rect);
        self.emit(WindowEventKind::Restore, id);
        true
    }

    /// Restores and refocuses the window if minimized, minimizes it
    /// otherwise.
    ///
    /// Single operation rather than two calls so the taskbar toggle cannot
    /// race a half-applied transition; toggling twice from an open, focused
    /// window lands back in an open, focused state. Returns `false` for an
    /// unknown id.
    pub fn toggle_minimize(&self, id: &WindowId) -> bool {
        let minimized = {
            let state = self.state.borrow();
            match state.windows.iter().find(|w| w.id == *id) {
                Some(window) => window.minimized,
                None => return false,
            }
        };
        if minimized {
            self.restore_window(id) && self.focus_window(id)
        } else {
            self.minimize_window(id)
        }
    }

    /// Closes a window and frees its id for reuse.
    ///
    /// Returns `false` for an unknown id. The record leaves the live map
    /// before `Close` fires, so listeners querying the manager during the
    /// close handler correctly see the window as gone.
    pub fn close_window(&self, id: &WindowId) -> bool {
        let surface = {
            let mut state = self.state.borrow_mut();
            let Some(index) = state.windows.iter().position(|w| w.id == *id) else {
                return false;
            };
            state.windows.remove(index).surface
        };

        self.engine.unmount(surface);
        self.emit(WindowEventKind::Close, id);
        true
    }

    /// Closes every live window; each closure emits its own `Close` event
    /// so taskbar teardown stays in sync.
    pub fn close_all_windows(&self) {
        let ids = self.window_ids();
        for id in ids {
            self.close_window(&id);
        }
    }

    /// Updates a window's title in the live map and on the engine surface.
    ///
    /// Returns `false` for an unknown id. Title changes are not lifecycle
    /// events; the orchestrator mirrors them into the taskbar directly.
    pub fn set_window_title(&self, id: &WindowId, title: impl Into<String>) -> bool {
        let title = title.into();
        let surface = {
            let mut state = self.state.borrow_mut();
            let Some(window) = state.windows.iter_mut().find(|w| w.id == *id) else {
                return false;
            };
            window.title = title.clone();
            window.surface
        };
        self.engine.set_title(surface, &title);
        true
    }

    /// Whether a live window carries `id`. Pure read, emits nothing.
    pub fn has_window(&self, id: &WindowId) -> bool {
        self.state.borrow().windows.iter().any(|w| w.id == *id)
    }

    /// Whether the window is minimized; `false` for unknown ids. Pure read.
    pub fn is_minimized(&self, id: &WindowId) -> bool {
        self.state
            .borrow()
            .windows
            .iter()
            .find(|w| w.id == *id)
            .map(|w| w.minimized)
            .unwrap_or(false)
    }

    /// Snapshot of a live window. Pure read.
    pub fn get_window(&self, id: &WindowId) -> Option<WindowSnapshot> {
        self.state
            .borrow()
            .windows
            .iter()
            .find(|w| w.id == *id)
            .map(WindowRecord::snapshot)
    }

    /// Ids of all live windows in creation order. Pure read.
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.state
            .borrow()
            .windows
            .iter()
            .map(|w| w.id.clone())
            .collect()
    }

    /// Id of the focused window, if any. Pure read.
    pub fn focused_window(&self) -> Option<WindowId> {
        self.state
            .borrow()
            .windows
            .iter()
            .find(|w| w.focused)
            .map(|w| w.id.clone())
    }

    /// The viewport this manager places windows into.
    pub fn viewport(&self) -> WindowRect {
        self.viewport
    }

    fn next_synthetic_id(&self) -> WindowId {
        loop {
            let candidate = {
                let mut state = self.state.borrow_mut();
                let n = state.next_synthetic;
                state.next_synthetic += 1;
                WindowId::synthetic(n)
            };
            if !self.has_window(&candidate) {
                return candidate;
            }
        }
    }

    fn work_area(&self) -> WindowRect {
        WindowRect {
            x: self.viewport.x,
            y: self.viewport.y + TASKBAR_BAND_HEIGHT,
            w: self.viewport.w,
            h: (self.viewport.h - TASKBAR_BAND_HEIGHT).max(0),
        }
    }

    fn cascade_rect(&self, slot: u64) -> WindowRect {
        let offset = (slot % CASCADE_SLOTS) as i32 * CASCADE_STEP;
        let work = self.work_area();
        WindowRect {
            x: work.x + 40 + offset,
            y: work.y + 20 + offset,
            ..WindowRect::default()
        }
    }

    fn clamp_to_work_area(&self, rect: WindowRect, min_size: WindowMinSize) -> WindowRect {
        let work = self.work_area();
        let rect = rect.clamped_min(min_size.w, min_size.h);
        let w = rect.w.min(work.w);
        let h = rect.h.min(work.h);
        WindowRect {
            x: rect.x.clamp(work.x, (work.x + work.w - w).max(work.x)),
            y: rect.y.clamp(work.y, (work.y + work.h - h).max(work.y)),
            w,
            h,
        }
    }

    fn surface_intent_handler(&self, id: WindowId) -> Rc<dyn Fn(SurfaceIntent)> {
        let weak = self.weak.clone();
        Rc::new(move |intent| {
            let Some(manager) = weak.upgrade() else {
                return;
            };
            manager.apply_surface_intent(&id, intent);
        })
    }

    fn apply_surface_intent(&self, id: &WindowId, intent: SurfaceIntent) {
        match intent {
            SurfaceIntent::Focus => {
                self.focus_window(id);
            }
            SurfaceIntent::Minimize => {
                self.minimize_window(id);
            }
            SurfaceIntent::Maximize => {
                self.maximize_window(id);
            }
            SurfaceIntent::Restore => {
                self.restore_window(id);
            }
            SurfaceIntent::Close => {
                let closable = self
                    .get_window(id)
                    .map(|w| w.flags.closable)
                    .unwrap_or(false);
                if closable {
                    self.close_window(id);
                } else {
                    log::debug!("window `{id}` is not closable");
                }
            }
        }
    }

    fn emit(&self, kind: WindowEventKind, id: &WindowId) {
        self.listeners.emit(&WindowEvent::now(kind, id.clone()));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use kiosk_app_contract::NullWindowEngine;
    use pretty_assertions::assert_eq;

    use super::*;

    fn viewport() -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            w: 1280,
            h: 800,
        }
    }

    fn manager() -> Rc<WindowManager> {
        WindowManager::new(Rc::new(NullWindowEngine::new()), viewport())
    }

    fn record_events(manager: &WindowManager) -> Rc<RefCell<Vec<(WindowEventKind, WindowId)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        manager.subscribe(Rc::new(move |event: &WindowEvent| {
            sink.borrow_mut()
                .push((event.kind, event.window_id.clone()));
        }));
        seen
    }

    fn config(id: &str) -> WindowConfig {
        let mut config = WindowConfig::new(format!("Window {id}"));
        config.id = Some(WindowId::new(id));
        config
    }

    #[test]
    fn create_with_distinct_ids_yields_exactly_that_set() {
        let wm = manager();
        wm.create_window(config("a"));
        wm.create_window(config("b"));
        wm.create_window(config("c"));

        assert_eq!(
            wm.window_ids(),
            vec![WindowId::new("a"), WindowId::new("b"), WindowId::new("c")]
        );
        assert_eq!(wm.focused_window(), Some(WindowId::new("c")));
    }

    #[test]
    fn duplicate_create_refocuses_without_second_open_event() {
        let wm = manager();
        let events = record_events(&wm);

        wm.create_window(config("a"));
        wm.create_window(config("b"));
        let mut second = config("a");
        second.title = "Completely different".to_string();
        let id = wm.create_window(second);

        assert_eq!(id, WindowId::new("a"));
        assert_eq!(wm.window_ids().len(), 2);
        assert_eq!(wm.focused_window(), Some(WindowId::new("a")));
        // Later configuration is discarded; the original title survives.
        assert_eq!(wm.get_window(&id).unwrap().title, "Window a");

        let opens = events
            .borrow()
            .iter()
            .filter(|(kind, window_id)| *kind == WindowEventKind::Open && *window_id == id)
            .count();
        assert_eq!(opens, 1);
    }

    #[test]
    fn synthetic_ids_auto_increment_when_config_has_none() {
        let wm = manager();
        let first = wm.create_window(WindowConfig::new("anon"));
        let second = wm.create_window(WindowConfig::new("anon"));
        assert_eq!(first, WindowId::synthetic(1));
        assert_eq!(second, WindowId::synthetic(2));
    }

    #[test]
    fn cascade_offsets_successive_windows_and_explicit_rect_wins() {
        let wm = manager();
        let a = wm.create_window(WindowConfig::new("first"));
        let b = wm.create_window(WindowConfig::new("second"));
        let rect_a = wm.get_window(&a).unwrap().rect;
        let rect_b = wm.get_window(&b).unwrap().rect;
        assert_eq!(rect_b.x, rect_a.x + CASCADE_STEP);
        assert_eq!(rect_b.y, rect_a.y + CASCADE_STEP);
        assert!(rect_a.y >= TASKBAR_BAND_HEIGHT);

        let mut explicit = WindowConfig::new("placed");
        explicit.rect = Some(WindowRect {
            x: 600,
            y: 300,
            w: 320,
            h: 240,
        });
        let c = wm.create_window(explicit);
        let rect_c = wm.get_window(&c).unwrap().rect;
        assert_eq!((rect_c.x, rect_c.y), (600, 300));
        assert_eq!((rect_c.w, rect_c.h), (320, 240));

        // The explicitly placed window took no cascade slot, so the next
        // default-placed window continues the cascade from the second.
        let d = wm.create_window(WindowConfig::new("third"));
        let rect_d = wm.get_window(&d).unwrap().rect;
        assert_eq!(rect_d.x, rect_b.x + CASCADE_STEP);
        assert_eq!(rect_d.y, rect_b.y + CASCADE_STEP);
    }

    #[test]
    fn oversized_or_offscreen_geometry_is_clamped_to_the_work_area() {
        let wm = manager();
        let mut config = WindowConfig::new("huge");
        config.rect = Some(WindowRect {
            x: -500,
            y: -500,
            w: 5000,
            h: 5000,
        });
        let id = wm.create_window(config);
        let rect = wm.get_window(&id).unwrap().rect;
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, TASKBAR_BAND_HEIGHT);
        assert_eq!(rect.w, 1280);
        assert_eq!(rect.h, 800 - TASKBAR_BAND_HEIGHT);
    }

    #[test]
    fn unknown_ids_are_reported_as_false_no_ops() {
        let wm = manager();
        let ghost = WindowId::new("ghost");
        let events = record_events(&wm);

        assert!(!wm.close_window(&ghost));
        assert!(!wm.minimize_window(&ghost));
        assert!(!wm.maximize_window(&ghost));
        assert!(!wm.restore_window(&ghost));
        assert!(!wm.focus_window(&ghost));
        assert!(!wm.toggle_minimize(&ghost));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn queries_never_emit_events() {
        let wm = manager();
        let id = wm.create_window(config("a"));
        let events = record_events(&wm);

        assert!(wm.has_window(&id));
        assert!(!wm.is_minimized(&id));
        assert!(wm.get_window(&id).is_some());
        assert_eq!(wm.window_ids().len(), 1);
        assert_eq!(wm.focused_window(), Some(id));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn toggle_minimize_is_its_own_inverse() {
        let wm = manager();
        let id = wm.create_window(config("a"));
        let before = wm.get_window(&id).unwrap();

        assert!(wm.toggle_minimize(&id));
        assert!(wm.is_minimized(&id));

        assert!(wm.toggle_minimize(&id));
        let after = wm.get_window(&id).unwrap();
        assert!(!after.minimized);
        assert!(after.focused);
        assert_eq!(after.rect, before.rect);
        assert_eq!(wm.focused_window(), Some(id));
    }

    #[test]
    fn maximize_then_restore_returns_original_geometry() {
        let wm = manager();
        let id = wm.create_window(config("a"));
        let original = wm.get_window(&id).unwrap().rect;

        assert!(wm.maximize_window(&id));
        let maximized = wm.get_window(&id).unwrap();
        assert!(maximized.maximized);
        assert_eq!(maximized.rect.y, TASKBAR_BAND_HEIGHT);
        assert_eq!(maximized.restore_rect, Some(original));

        assert!(wm.restore_window(&id));
        let restored = wm.get_window(&id).unwrap();
        assert!(!restored.maximized);
        assert_eq!(restored.rect, original);
    }

    #[test]
    fn flags_forbid_minimize_and_maximize() {
        let wm = manager();
        let mut fixed = config("dialog");
        fixed.flags.minimizable = false;
        fixed.flags.maximizable = false;
        let id = wm.create_window(fixed);

        assert!(!wm.minimize_window(&id));
        assert!(!wm.maximize_window(&id));
        assert!(!wm.is_minimized(&id));
    }

    #[test]
    fn close_removes_window_before_the_close_event_fires() {
        let wm = manager();
        let id = wm.create_window(config("a"));

        let observed_alive = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&observed_alive);
        let probe = Rc::downgrade(&wm);
        wm.subscribe(Rc::new(move |event: &WindowEvent| {
            if event.kind == WindowEventKind::Close {
                if let Some(wm) = probe.upgrade() {
                    *sink.borrow_mut() = Some(wm.has_window(&event.window_id));
                }
            }
        }));

        assert!(wm.close_window(&id));
        assert_eq!(*observed_alive.borrow(), Some(false));
        assert!(!wm.has_window(&id));
    }

    #[test]
    fn closed_ids_may_be_reused_by_a_future_creation() {
        let wm = manager();
        let events = record_events(&wm);
        let id = wm.create_window(config("a"));
        wm.close_window(&id);
        let reused = wm.create_window(config("a"));

        assert_eq!(reused, id);
        let opens = events
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == WindowEventKind::Open)
            .count();
        assert_eq!(opens, 2);
    }

    #[test]
    fn close_all_emits_one_close_per_window() {
        let wm = manager();
        wm.create_window(config("a"));
        wm.create_window(config("b"));
        wm.create_window(config("c"));
        let events = record_events(&wm);

        wm.close_all_windows();

        let closes: Vec<WindowId> = events
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == WindowEventKind::Close)
            .map(|(_, id)| id.clone())
            .collect();
        assert_eq!(closes.len(), 3);
        assert!(wm.window_ids().is_empty());
    }

    #[test]
    fn focus_change_blurs_the_previous_window() {
        let wm = manager();
        let a = wm.create_window(config("a"));
        let b = wm.create_window(config("b"));
        let events = record_events(&wm);

        assert!(wm.focus_window(&a));
        assert_eq!(
            *events.borrow(),
            vec![
                (WindowEventKind::Blur, b.clone()),
                (WindowEventKind::Focus, a.clone())
            ]
        );

        // Refocusing the focused window is idempotent and silent.
        events.borrow_mut().clear();
        assert!(wm.focus_window(&a));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn surface_intents_route_back_into_transitions() {
        struct ChromeProbe {
            inner: NullWindowEngine,
            handlers: RefCell<Vec<Rc<dyn Fn(SurfaceIntent)>>>,
        }
        impl WindowEngine for ChromeProbe {
            fn mount(
                &self,
                config: &WindowConfig,
                rect: WindowRect,
                intents: Rc<dyn Fn(SurfaceIntent)>,
            ) -> SurfaceHandle {
                self.handlers.borrow_mut().push(Rc::clone(&intents));
                self.inner.mount(config, rect, intents)
            }
            fn raise(&self, surface: SurfaceHandle) {
                self.inner.raise(surface);
            }
            fn minimize(&self, surface: SurfaceHandle) {
                self.inner.minimize(surface);
            }
            fn maximize(&self, surface: SurfaceHandle, rect: WindowRect) {
                self.inner.maximize(surface, rect);
            }
            fn restore(&self, surface: SurfaceHandle, rect: WindowRect) {
                self.inner.restore(surface, rect);
            }
            fn set_title(&self, surface: SurfaceHandle, title: &str) {
                self.inner.set_title(surface, title);
            }
            fn unmount(&self, surface: SurfaceHandle) {
                self.inner.unmount(surface);
            }
        }

        let engine = Rc::new(ChromeProbe {
            inner: NullWindowEngine::new(),
            handlers: RefCell::new(Vec::new()),
        });
        let wm = WindowManager::new(Rc::clone(&engine) as Rc<dyn WindowEngine>, viewport());
        let id = wm.create_window(config("a"));
        let chrome = engine.handlers.borrow()[0].clone();

        chrome(SurfaceIntent::Minimize);
        assert!(wm.is_minimized(&id));
        chrome(SurfaceIntent::Restore);
        assert!(!wm.is_minimized(&id));
        chrome(SurfaceIntent::Close);
        assert!(!wm.has_window(&id));
    }

    #[test]
    fn set_window_title_updates_snapshot_without_lifecycle_events() {
        let wm = manager();
        let id = wm.create_window(config("a"));
        let events = record_events(&wm);

        assert!(wm.set_window_title(&id, "Renamed"));
        assert_eq!(wm.get_window(&id).unwrap().title, "Renamed");
        assert!(!wm.set_window_title(&WindowId::new("ghost"), "x"));
        assert!(events.borrow().is_empty());
    }
}
