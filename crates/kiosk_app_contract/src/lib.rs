//! Shared contract types between the kiosk desktop core and its host layers.
//!
//! The core (window manager, taskbar, orchestrator) depends only on the
//! contracts defined here: canonical action identifiers, window configuration,
//! the visual-engine surface contract, and the repeating-task scheduler used
//! for the taskbar clock. Concrete rendering and host implementations live
//! outside the core and are injected at construction time.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default width for a window whose configuration omits geometry.
pub const DEFAULT_WINDOW_WIDTH: i32 = 420;
/// Default height for a window whose configuration omits geometry.
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;
/// Default minimum width floor for managed windows.
pub const DEFAULT_MIN_WINDOW_WIDTH: i32 = 220;
/// Default minimum height floor for managed windows.
pub const DEFAULT_MIN_WINDOW_HEIGHT: i32 = 140;

/// Stable identifier for a launchable application or built-in command.
///
/// Action identifiers are produced by desktop icons, start-menu items, and
/// external triggers, and resolved by the app registry. Unknown identifiers
/// are tolerated by consumers and never cause an error to escape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    /// Returns an action identifier when `raw` conforms to the id policy:
    /// lowercase ascii segments of letters, digits, and `-`, no leading or
    /// trailing dash, at most 64 bytes.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_action_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!("invalid action id `{raw}`; expected lowercase dashed segments"))
        }
    }

    /// Creates an id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_action_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    if bytes[0] == b'-' || raw.ends_with('-') {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

/// Stable identifier for a managed window.
///
/// Ids are chosen by the launching application (the "singleton window per id"
/// idiom) or synthesized by the window manager when the configuration omits
/// one. A closed window frees its id for reuse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    /// Creates a window id from an application-chosen string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Creates the `n`-th synthetic auto-incremented window id.
    pub fn synthetic(n: u64) -> Self {
        Self(format!("window-{n}"))
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen-space rectangle for window geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl WindowRect {
    /// Returns the rect translated by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Returns the rect with width/height raised to at least the given floor.
    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 48,
            y: 48,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Minimum size floor for a managed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowMinSize {
    /// Minimum width in pixels.
    pub w: i32,
    /// Minimum height in pixels.
    pub h: i32,
}

impl Default for WindowMinSize {
    fn default() -> Self {
        Self {
            w: DEFAULT_MIN_WINDOW_WIDTH,
            h: DEFAULT_MIN_WINDOW_HEIGHT,
        }
    }
}

/// Behavioral flags for a managed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFlags {
    /// Whether the user may resize the window.
    pub resizable: bool,
    /// Whether the window chrome offers a close control.
    pub closable: bool,
    /// Whether the window may be minimized to the taskbar.
    pub minimizable: bool,
    /// Whether the window may be maximized to the work area.
    pub maximizable: bool,
    /// Whether the window is a modal dialog.
    pub modal: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            resizable: true,
            closable: true,
            minimizable: true,
            maximizable: true,
            modal: false,
        }
    }
}

/// Content mounted into a managed window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowContent {
    /// Serialized markup rendered by the visual engine.
    Markup(String),
    /// Opaque handle to content owned by the visual engine.
    Handle(u64),
}

impl Default for WindowContent {
    fn default() -> Self {
        Self::Markup(String::new())
    }
}

/// Configuration produced by a launch factory and submitted to the window
/// manager.
///
/// Geometry fields are advisory: an explicit rect always wins over the
/// manager's cascade placement, and the resolved rect is clamped to the
/// visible work area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window id; `None` requests a synthetic auto-incremented id.
    pub id: Option<WindowId>,
    /// Title shown in the window chrome and taskbar.
    pub title: String,
    /// Optional icon tag for chrome and taskbar display.
    pub icon_id: Option<String>,
    /// Optional explicit geometry overriding cascade placement.
    pub rect: Option<WindowRect>,
    /// Minimum size floor enforced on the resolved geometry.
    pub min_size: WindowMinSize,
    /// Behavioral flags.
    pub flags: WindowFlags,
    /// Content to mount into the window.
    pub content: WindowContent,
}

impl WindowConfig {
    /// Creates a configuration with default geometry, flags, and empty content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            icon_id: None,
            rect: None,
            min_size: WindowMinSize::default(),
            flags: WindowFlags::default(),
            content: WindowContent::default(),
        }
    }
}

/// Error produced by a failing launch factory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaunchError {
    /// The factory could not produce a window configuration.
    #[error("launch factory failed: {0}")]
    Factory(String),
}

/// Future resolved by an application launch factory.
///
/// Factories may suspend (for example to fetch external data) and must not
/// assume exclusive access to shared UI state across the suspension; other
/// launches may interleave arbitrarily while one is in flight.
pub type LaunchFuture = LocalBoxFuture<'static, Result<WindowConfig, LaunchError>>;

/// Opaque handle to an on-screen window surface owned by the visual engine.
///
/// The core never depends on the engine's concrete instance type; it keeps an
/// id-indexed table of these handles and drives transitions through
/// [`WindowEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(pub u64);

/// User intent originating from a surface's own chrome (title-bar buttons,
/// close box, click-to-raise) and routed back into the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceIntent {
    /// The surface was activated and wants focus.
    Focus,
    /// The minimize control was pressed.
    Minimize,
    /// The maximize control was pressed.
    Maximize,
    /// The restore control was pressed.
    Restore,
    /// The close control was pressed.
    Close,
}

/// Callback through which an engine reports [`SurfaceIntent`] values.
pub type SurfaceIntentHandler = Rc<dyn Fn(SurfaceIntent)>;

/// Rendering collaborator that realizes managed windows on screen.
///
/// Every transition method returns after the corresponding visual transition
/// has completed from the manager's point of view; the engine's internal
/// animation may still settle cosmetically afterwards. Implementations must
/// not call back into the window manager from within these methods; chrome
/// actions are delivered asynchronously through the mounted intent handler.
pub trait WindowEngine {
    /// Realizes a draggable/resizable on-screen window for `config` at the
    /// resolved `rect` and returns its opaque surface handle. `intents` is
    /// invoked whenever the user operates the surface's own chrome.
    fn mount(
        &self,
        config: &WindowConfig,
        rect: WindowRect,
        intents: SurfaceIntentHandler,
    ) -> SurfaceHandle;

    /// Raises the surface to the top of the visual stack.
    fn raise(&self, surface: SurfaceHandle);

    /// Hides the surface into its minimized representation.
    fn minimize(&self, surface: SurfaceHandle);

    /// Expands the surface to fill `rect`.
    fn maximize(&self, surface: SurfaceHandle, rect: WindowRect);

    /// Returns the surface to normal presentation at `rect`.
    fn restore(&self, surface: SurfaceHandle, rect: WindowRect);

    /// Updates the title shown in the surface chrome.
    fn set_title(&self, surface: SurfaceHandle, title: &str);

    /// Destroys the surface.
    fn unmount(&self, surface: SurfaceHandle);
}

/// No-op [`WindowEngine`] for headless operation and tests.
///
/// Tracks mount/unmount counts so callers can assert surface bookkeeping.
#[derive(Default)]
pub struct NullWindowEngine {
    next_surface: Cell<u64>,
    mounted: Cell<u64>,
    unmounted: Cell<u64>,
}

impl NullWindowEngine {
    /// Creates a fresh engine with no mounted surfaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of surfaces mounted so far.
    pub fn mounted(&self) -> u64 {
        self.mounted.get()
    }

    /// Number of surfaces unmounted so far.
    pub fn unmounted(&self) -> u64 {
        self.unmounted.get()
    }

    /// Number of surfaces currently alive.
    pub fn live(&self) -> u64 {
        self.mounted.get().saturating_sub(self.unmounted.get())
    }
}

impl WindowEngine for NullWindowEngine {
    fn mount(
        &self,
        _config: &WindowConfig,
        _rect: WindowRect,
        _intents: SurfaceIntentHandler,
    ) -> SurfaceHandle {
        let surface = SurfaceHandle(self.next_surface.get());
        self.next_surface.set(surface.0 + 1);
        self.mounted.set(self.mounted.get() + 1);
        surface
    }

    fn raise(&self, _surface: SurfaceHandle) {}

    fn minimize(&self, _surface: SurfaceHandle) {}

    fn maximize(&self, _surface: SurfaceHandle, _rect: WindowRect) {}

    fn restore(&self, _surface: SurfaceHandle, _rect: WindowRect) {}

    fn set_title(&self, _surface: SurfaceHandle, _title: &str) {}

    fn unmount(&self, _surface: SurfaceHandle) {
        self.unmounted.set(self.unmounted.get() + 1);
    }
}

/// Handle to a scheduled repeating task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

/// Host scheduler contract for repeating background tasks.
///
/// The taskbar clock is the only ongoing background task in the core; its
/// handle must be cancelled on teardown so the task never fires after the UI
/// is destroyed.
pub trait TaskScheduler {
    /// Schedules `task` to run once per `interval` until cancelled.
    fn schedule_repeating(&self, interval: Duration, task: Box<dyn FnMut()>) -> TaskHandle;

    /// Cancels a previously scheduled task. Unknown handles are ignored.
    fn cancel(&self, handle: TaskHandle);
}

/// Deterministic [`TaskScheduler`] driven manually by the caller.
///
/// Used by tests and headless operation: [`ManualScheduler::fire_all`]
/// simulates one interval elapsing for every live task.
#[derive(Default)]
pub struct ManualScheduler {
    inner: RefCell<ManualSchedulerState>,
}

#[derive(Default)]
struct ManualSchedulerState {
    next_handle: u64,
    tasks: Vec<(TaskHandle, Duration, Box<dyn FnMut()>)>,
    cancelled: Vec<TaskHandle>,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live scheduled tasks.
    pub fn live_tasks(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Runs every live task once, as if one interval elapsed for each.
    pub fn fire_all(&self) {
        // Take the task list out so a task body may reschedule or cancel
        // without observing a held borrow. Cancellations issued while the
        // list is taken out are recorded and honored on merge-back.
        let mut tasks = {
            let mut inner = self.inner.borrow_mut();
            inner.cancelled.clear();
            std::mem::take(&mut inner.tasks)
        };
        for (_, _, task) in tasks.iter_mut() {
            task();
        }
        let mut inner = self.inner.borrow_mut();
        let cancelled = std::mem::take(&mut inner.cancelled);
        tasks.retain(|(handle, _, _)| !cancelled.contains(handle));
        tasks.extend(std::mem::take(&mut inner.tasks));
        inner.tasks = tasks;
    }
}

impl TaskScheduler for ManualScheduler {
    fn schedule_repeating(&self, interval: Duration, task: Box<dyn FnMut()>) -> TaskHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = TaskHandle(inner.next_handle);
        inner.next_handle += 1;
        inner.tasks.push((handle, interval, task));
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.cancelled.push(handle);
        inner.tasks.retain(|(existing, _, _)| *existing != handle);
    }
}
