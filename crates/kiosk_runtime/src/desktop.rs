//! Desktop orchestrator: wires registry, window manager, and taskbar
//! together and owns the session-scoped resources.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use kiosk_app_contract::{ActionId, TaskHandle, TaskScheduler, WindowId};
use platform_host::SystemInfoSource;
use serde::{Deserialize, Serialize};

use crate::events::{ListenerId, WindowEvent, WindowEventKind};
use crate::registry::AppRegistry;
use crate::taskbar::{Taskbar, TaskbarIntent};
use crate::window_manager::WindowManager;

/// Refresh cadence of the taskbar clock.
const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// One shortcut icon on the desktop surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopIcon {
    /// Unique icon id.
    pub id: String,
    /// Label shown under the icon.
    pub label: String,
    /// Icon tag for the glyph.
    pub icon_id: String,
    /// Action dispatched when the icon is activated.
    pub action: ActionId,
    /// Grid position, row-major from the top-left.
    pub position: (u32, u32),
}

/// Keyboard input routed to the desktop surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopKey {
    /// Activates the selected icon.
    Enter,
    /// Dismisses the start menu.
    Escape,
}

/// Top-level orchestrator owning the wiring between components.
///
/// Construction installs the lifecycle relay, the taskbar intent handler,
/// and the repeating clock task; [`Desktop::shutdown`] (or drop) removes
/// each of them, leaving the collaborators unwired but intact.
pub struct Desktop {
    registry: Rc<AppRegistry>,
    windows: Rc<WindowManager>,
    taskbar: Rc<Taskbar>,
    scheduler: Rc<dyn TaskScheduler>,
    info: Rc<dyn SystemInfoSource>,
    icons: RefCell<Vec<DesktopIcon>>,
    selected_icon: RefCell<Option<String>>,
    relay_listener: Cell<Option<ListenerId>>,
    clock_task: Cell<Option<TaskHandle>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl Desktop {
    /// Builds the desktop and wires every collaborator.
    ///
    /// The relay subscription, the taskbar intent handler, the initial clock
    /// refresh, and the repeating clock task are all installed here so a
    /// constructed desktop is immediately live.
    pub fn new(
        registry: Rc<AppRegistry>,
        windows: Rc<WindowManager>,
        taskbar: Rc<Taskbar>,
        scheduler: Rc<dyn TaskScheduler>,
        info: Rc<dyn SystemInfoSource>,
    ) -> Rc<Self> {
        let pool = LocalPool::new();
        let spawner = pool.spawner();

        let desktop = Rc::new(Self {
            registry,
            windows,
            taskbar,
            scheduler,
            info,
            icons: RefCell::new(Vec::new()),
            selected_icon: RefCell::new(None),
            relay_listener: Cell::new(None),
            clock_task: Cell::new(None),
            pool: RefCell::new(pool),
            spawner,
        });

        desktop
            .relay_listener
            .set(Some(desktop.windows.subscribe(Self::taskbar_relay(
                Rc::clone(&desktop.taskbar),
                Rc::downgrade(&desktop.windows),
            ))));

        let intent_target = Rc::downgrade(&desktop);
        desktop.taskbar.set_intent_handler(Rc::new(move |intent| {
            let Some(desktop) = intent_target.upgrade() else {
                return;
            };
            match intent {
                TaskbarIntent::Launch(action) => desktop.dispatch_action(&action),
                TaskbarIntent::ActivateProgram(window_id) => {
                    desktop.activate_program(&window_id);
                }
            }
        }));

        desktop.taskbar.refresh_clock(desktop.info.as_ref());
        let clock_taskbar = Rc::clone(&desktop.taskbar);
        let clock_info = Rc::clone(&desktop.info);
        desktop.clock_task.set(Some(desktop.scheduler.schedule_repeating(
            CLOCK_INTERVAL,
            Box::new(move || clock_taskbar.refresh_clock(clock_info.as_ref())),
        )));

        desktop
    }

    /// Lifecycle relay keeping taskbar buttons in sync with window state.
    fn taskbar_relay(
        taskbar: Rc<Taskbar>,
        windows: Weak<WindowManager>,
    ) -> Rc<dyn Fn(&WindowEvent)> {
        Rc::new(move |event: &WindowEvent| {
            match event.kind {
                WindowEventKind::Open => {
                    let Some(windows) = windows.upgrade() else {
                        return;
                    };
                    if let Some(snapshot) = windows.get_window(&event.window_id) {
                        taskbar.add_program(snapshot.id, snapshot.title, snapshot.icon_id);
                    }
                }
                WindowEventKind::Close => {
                    taskbar.remove_program(&event.window_id);
                }
                WindowEventKind::Focus => {
                    taskbar.set_active_program(Some(&event.window_id));
                }
                WindowEventKind::Blur | WindowEventKind::Minimize => {
                    // Clear only if the highlight still belongs to this
                    // window; a Focus for a successor may already have
                    // moved it. Minimize counts: the manager drops focus
                    // when it minimizes, without a separate Blur.
                    if taskbar.active_program() == Some(event.window_id.clone()) {
                        taskbar.set_active_program(None);
                    }
                }
                WindowEventKind::Maximize | WindowEventKind::Restore => {}
            }
        })
    }

    /// The application registry.
    pub fn registry(&self) -> &Rc<AppRegistry> {
        &self.registry
    }

    /// The window manager.
    pub fn windows(&self) -> &Rc<WindowManager> {
        &self.windows
    }

    /// The taskbar.
    pub fn taskbar(&self) -> &Rc<Taskbar> {
        &self.taskbar
    }

    /// Queues a launch of the application registered under `action`.
    ///
    /// The launch runs on the desktop's local executor; call
    /// [`Desktop::run_pending`] to drive queued launches to completion.
    pub fn dispatch_action(&self, action: &ActionId) {
        let registry = Rc::clone(&self.registry);
        let windows = Rc::clone(&self.windows);
        let task_action = action.clone();
        let spawn = self.spawner.spawn_local(async move {
            registry.launch(&task_action, &windows).await;
        });
        if let Err(error) = spawn {
            log::warn!("failed to queue launch of `{action}`: {error}");
        }
    }

    /// Drives queued launches until every ready future has run.
    pub fn run_pending(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Activates a window from its taskbar button: a minimized window is
    /// restored first, then focused; a visible window is focused directly.
    pub fn activate_program(&self, window_id: &WindowId) {
        if self.windows.is_minimized(window_id) {
            self.windows.restore_window(window_id);
        }
        self.windows.focus_window(window_id);
    }

    /// Requests closing a window, e.g. from an external kiosk supervisor.
    pub fn request_window_close(&self, window_id: &WindowId) -> bool {
        self.windows.close_window(window_id)
    }

    /// Adds a desktop icon. A duplicate id is skipped with a warning.
    pub fn add_icon(&self, icon: DesktopIcon) {
        let mut icons = self.icons.borrow_mut();
        if icons.iter().any(|existing| existing.id == icon.id) {
            log::warn!("ignoring duplicate desktop icon `{}`", icon.id);
            return;
        }
        icons.push(icon);
    }

    /// All desktop icons in addition order.
    pub fn icons(&self) -> Vec<DesktopIcon> {
        self.icons.borrow().clone()
    }

    /// Selects a single icon; unknown ids clear the selection the same way
    /// a click on empty desktop does.
    pub fn select_icon(&self, id: &str) {
        let known = self.icons.borrow().iter().any(|icon| icon.id == id);
        *self.selected_icon.borrow_mut() = known.then(|| id.to_string());
    }

    /// Clears the icon selection, as a click on empty desktop does.
    pub fn clear_icon_selection(&self) {
        self.selected_icon.borrow_mut().take();
    }

    /// Id of the selected icon, if any.
    pub fn selected_icon(&self) -> Option<String> {
        self.selected_icon.borrow().clone()
    }

    /// Activates an icon (double-click): selects it and dispatches its
    /// action.
    pub fn activate_icon(&self, id: &str) {
        let action = self
            .icons
            .borrow()
            .iter()
            .find(|icon| icon.id == id)
            .map(|icon| icon.action.clone());
        let Some(action) = action else {
            return;
        };
        self.select_icon(id);
        self.dispatch_action(&action);
    }

    /// Handles a keyboard shortcut on the desktop surface.
    pub fn handle_key(&self, key: DesktopKey) {
        match key {
            DesktopKey::Enter => {
                if let Some(selected) = self.selected_icon() {
                    self.activate_icon(&selected);
                }
            }
            DesktopKey::Escape => {
                self.taskbar.close_start_menu();
            }
        }
    }

    /// Tears down everything [`Desktop::new`] wired: the lifecycle relay,
    /// the taskbar intent handler, and the clock task. Idempotent; windows
    /// and taskbar state are left as they are for the caller to dispose.
    pub fn shutdown(&self) {
        if let Some(listener) = self.relay_listener.take() {
            self.windows.unsubscribe(listener);
        }
        self.taskbar.clear_intent_handler();
        if let Some(task) = self.clock_task.take() {
            self.scheduler.cancel(task);
        }
    }
}

impl Drop for Desktop {
    fn drop(&mut self) {
        self.shutdown();
    }
}
