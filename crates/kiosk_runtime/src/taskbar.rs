//! Taskbar state: running-program buttons, start menu, and clock.
//!
//! The taskbar never manipulates windows directly. User actions surface as
//! [`TaskbarIntent`] values handed to the orchestrator, and window state
//! flows back in through the mutation methods the orchestrator drives from
//! lifecycle events.

use std::cell::RefCell;
use std::rc::Rc;

use kiosk_app_contract::{ActionId, WindowId};
use platform_host::{local_datetime, DateTimeInfo, SystemInfoSource};
use serde::{Deserialize, Serialize};

/// One running-program button on the taskbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskbarItem {
    /// Window the button represents.
    pub window_id: WindowId,
    /// Button label, mirroring the window title.
    pub title: String,
    /// Optional icon tag.
    pub icon_id: Option<String>,
    /// Whether the button is highlighted as the active window.
    pub active: bool,
}

/// User intent raised by taskbar interaction and dispatched to the
/// orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskbarIntent {
    /// A start-menu item was selected.
    Launch(ActionId),
    /// A running-program button was clicked.
    ActivateProgram(WindowId),
}

#[derive(Default)]
struct TaskbarState {
    items: Vec<TaskbarItem>,
    start_menu_open: bool,
    clock: Option<DateTimeInfo>,
}

/// Taskbar model: program buttons in window-open order, start-menu
/// visibility, and the clock readout.
#[derive(Default)]
pub struct Taskbar {
    state: RefCell<TaskbarState>,
    intent_handler: RefCell<Option<Rc<dyn Fn(TaskbarIntent)>>>,
}

impl Taskbar {
    /// Creates an empty taskbar with a closed start menu and no clock value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the intent handler the orchestrator listens on. A later call
    /// replaces the previous handler.
    pub fn set_intent_handler(&self, handler: Rc<dyn Fn(TaskbarIntent)>) {
        *self.intent_handler.borrow_mut() = Some(handler);
    }

    /// Removes the installed intent handler; later interactions are dropped.
    pub fn clear_intent_handler(&self) {
        self.intent_handler.borrow_mut().take();
    }

    /// Adds a program button for a newly opened window. Re-adding a tracked
    /// window is a no-op.
    pub fn add_program(&self, window_id: WindowId, title: impl Into<String>, icon_id: Option<String>) {
        let mut state = self.state.borrow_mut();
        if state.items.iter().any(|item| item.window_id == window_id) {
            return;
        }
        state.items.push(TaskbarItem {
            window_id,
            title: title.into(),
            icon_id,
            active: false,
        });
    }

    /// Removes the button for a closed window. Unknown ids are ignored.
    pub fn remove_program(&self, window_id: &WindowId) {
        self.state
            .borrow_mut()
            .items
            .retain(|item| item.window_id != *window_id);
    }

    /// Marks at most one button active.
    ///
    /// `None` clears the highlight entirely. A `Some` id that is not tracked
    /// leaves every button untouched, including the current highlight.
    pub fn set_active_program(&self, window_id: Option<&WindowId>) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = window_id {
            if !state.items.iter().any(|item| item.window_id == *id) {
                return;
            }
        }
        for item in state.items.iter_mut() {
            item.active = window_id == Some(&item.window_id);
        }
    }

    /// Id of the highlighted button, if any.
    pub fn active_program(&self) -> Option<WindowId> {
        self.state
            .borrow()
            .items
            .iter()
            .find(|item| item.active)
            .map(|item| item.window_id.clone())
    }

    /// Mirrors a window title change onto its button. Unknown ids are
    /// ignored.
    pub fn update_program_title(&self, window_id: &WindowId, title: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        if let Some(item) = state
            .items
            .iter_mut()
            .find(|item| item.window_id == *window_id)
        {
            item.title = title.into();
        }
    }

    /// Whether a button is tracked for `window_id`.
    pub fn is_running(&self, window_id: &WindowId) -> bool {
        self.state
            .borrow()
            .items
            .iter()
            .any(|item| item.window_id == *window_id)
    }

    /// All program buttons in window-open order.
    pub fn programs(&self) -> Vec<TaskbarItem> {
        self.state.borrow().items.clone()
    }

    /// Opens the start menu.
    pub fn open_start_menu(&self) {
        self.state.borrow_mut().start_menu_open = true;
    }

    /// Closes the start menu.
    pub fn close_start_menu(&self) {
        self.state.borrow_mut().start_menu_open = false;
    }

    /// Toggles start-menu visibility.
    pub fn toggle_start_menu(&self) {
        let mut state = self.state.borrow_mut();
        state.start_menu_open = !state.start_menu_open;
    }

    /// Whether the start menu is open.
    pub fn is_start_menu_open(&self) -> bool {
        self.state.borrow().start_menu_open
    }

    /// Closes the start menu when a click lands outside it.
    pub fn handle_outside_click(&self) {
        self.close_start_menu();
    }

    /// Dispatches a start-menu selection as a [`TaskbarIntent::Launch`].
    ///
    /// The menu closes unconditionally after dispatch, whether or not a
    /// handler is installed or the launch later succeeds.
    pub fn select_start_menu_item(&self, action: ActionId) {
        let handler = self.intent_handler.borrow().clone();
        if let Some(handler) = handler {
            handler(TaskbarIntent::Launch(action));
        }
        self.close_start_menu();
    }

    /// Dispatches a program-button click as a
    /// [`TaskbarIntent::ActivateProgram`]. Clicks on untracked ids are
    /// dropped.
    pub fn click_program(&self, window_id: &WindowId) {
        if !self.is_running(window_id) {
            return;
        }
        let handler = self.intent_handler.borrow().clone();
        if let Some(handler) = handler {
            handler(TaskbarIntent::ActivateProgram(window_id.clone()));
        }
    }

    /// Refreshes the clock readout from `source`, degrading to the locally
    /// computed time when the source fails.
    pub fn refresh_clock(&self, source: &dyn SystemInfoSource) {
        let datetime = match source.datetime() {
            Ok(datetime) => datetime,
            Err(error) => {
                log::warn!("clock source unavailable, using local time: {error}");
                local_datetime()
            }
        };
        self.state.borrow_mut().clock = Some(datetime);
    }

    /// Current clock readout; `None` until the first refresh.
    pub fn clock(&self) -> Option<DateTimeInfo> {
        self.state.borrow().clock.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use platform_host::HostInfoError;
    use pretty_assertions::assert_eq;

    use super::*;

    fn intent_sink(taskbar: &Taskbar) -> Rc<RefCell<Vec<TaskbarIntent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        taskbar.set_intent_handler(Rc::new(move |intent| {
            sink.borrow_mut().push(intent);
        }));
        seen
    }

    #[test]
    fn programs_track_add_remove_in_open_order() {
        let taskbar = Taskbar::new();
        taskbar.add_program(WindowId::new("a"), "Alpha", None);
        taskbar.add_program(WindowId::new("b"), "Beta", Some("beta".to_string()));
        taskbar.add_program(WindowId::new("a"), "Replayed", None);

        let programs = taskbar.programs();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].title, "Alpha");
        assert_eq!(programs[1].window_id, WindowId::new("b"));

        taskbar.remove_program(&WindowId::new("a"));
        taskbar.remove_program(&WindowId::new("ghost"));
        assert_eq!(taskbar.programs().len(), 1);
    }

    #[test]
    fn active_highlight_is_exclusive_and_ignores_unknown_ids() {
        let taskbar = Taskbar::new();
        taskbar.add_program(WindowId::new("a"), "Alpha", None);
        taskbar.add_program(WindowId::new("b"), "Beta", None);

        taskbar.set_active_program(Some(&WindowId::new("a")));
        taskbar.set_active_program(Some(&WindowId::new("b")));
        assert_eq!(taskbar.active_program(), Some(WindowId::new("b")));
        assert_eq!(
            taskbar
                .programs()
                .iter()
                .filter(|item| item.active)
                .count(),
            1
        );

        taskbar.set_active_program(Some(&WindowId::new("ghost")));
        assert_eq!(taskbar.active_program(), Some(WindowId::new("b")));

        taskbar.set_active_program(None);
        assert_eq!(taskbar.active_program(), None);
    }

    #[test]
    fn start_menu_selection_dispatches_then_always_closes() {
        let taskbar = Taskbar::new();
        let intents = intent_sink(&taskbar);

        taskbar.open_start_menu();
        taskbar.select_start_menu_item(ActionId::trusted("notes"));

        assert!(!taskbar.is_start_menu_open());
        assert_eq!(
            *intents.borrow(),
            vec![TaskbarIntent::Launch(ActionId::trusted("notes"))]
        );

        // No handler installed: the selection is dropped but the menu still
        // closes.
        taskbar.clear_intent_handler();
        taskbar.open_start_menu();
        taskbar.select_start_menu_item(ActionId::trusted("ghost"));
        assert!(!taskbar.is_start_menu_open());
        assert_eq!(intents.borrow().len(), 1);
    }

    #[test]
    fn outside_click_and_toggle_drive_menu_visibility() {
        let taskbar = Taskbar::new();
        taskbar.toggle_start_menu();
        assert!(taskbar.is_start_menu_open());
        taskbar.handle_outside_click();
        assert!(!taskbar.is_start_menu_open());
        taskbar.toggle_start_menu();
        taskbar.toggle_start_menu();
        assert!(!taskbar.is_start_menu_open());
    }

    #[test]
    fn program_clicks_dispatch_only_for_tracked_windows() {
        let taskbar = Taskbar::new();
        let intents = intent_sink(&taskbar);
        taskbar.add_program(WindowId::new("a"), "Alpha", None);

        taskbar.click_program(&WindowId::new("a"));
        taskbar.click_program(&WindowId::new("ghost"));

        assert_eq!(
            *intents.borrow(),
            vec![TaskbarIntent::ActivateProgram(WindowId::new("a"))]
        );
    }

    #[test]
    fn title_updates_mirror_onto_the_button() {
        let taskbar = Taskbar::new();
        taskbar.add_program(WindowId::new("a"), "Alpha", None);
        taskbar.update_program_title(&WindowId::new("a"), "Alpha - report.txt");
        taskbar.update_program_title(&WindowId::new("ghost"), "ignored");
        assert_eq!(taskbar.programs()[0].title, "Alpha - report.txt");
    }

    #[test]
    fn clock_refresh_falls_back_to_local_time_when_the_source_fails() {
        struct OfflineSource;
        impl SystemInfoSource for OfflineSource {
            fn datetime(&self) -> Result<DateTimeInfo, HostInfoError> {
                Err(HostInfoError::Unavailable("rtc offline".to_string()))
            }
            fn hardware_profile(
                &self,
            ) -> Result<platform_host::HardwareProfile, HostInfoError> {
                Err(HostInfoError::Unavailable("rtc offline".to_string()))
            }
            fn system_stats(&self) -> Result<platform_host::SystemStats, HostInfoError> {
                Err(HostInfoError::Unavailable("rtc offline".to_string()))
            }
            fn drives(&self) -> Result<Vec<platform_host::DriveInfo>, HostInfoError> {
                Err(HostInfoError::Unavailable("rtc offline".to_string()))
            }
        }

        let taskbar = Taskbar::new();
        assert_eq!(taskbar.clock(), None);
        taskbar.refresh_clock(&OfflineSource);
        let clock = taskbar.clock().expect("fallback clock");
        assert_eq!(clock.time_24h.len(), 5);
    }
}
