//! Application catalog mapping action identifiers to launch factories.

use std::cell::RefCell;
use std::fmt;

use kiosk_app_contract::{ActionId, LaunchFuture};
use serde::{Deserialize, Serialize};

use crate::window_manager::WindowManager;

/// Start-menu grouping for a registered application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartMenuGroup {
    /// Everyday applications listed first.
    Primary,
    /// Utilities and configuration listed after the primary group.
    Secondary,
    /// Session-ending commands pinned to the bottom.
    Power,
}

impl StartMenuGroup {
    /// Sort rank of the group within the start menu.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Power => 2,
        }
    }

    /// Stable string token for logging and debugging hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Power => "power",
        }
    }
}

/// Presentation metadata for a registered application, safe to hand to UI
/// layers without exposing the launch factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDescriptor {
    /// Canonical action identifier.
    pub id: ActionId,
    /// Human-readable title.
    pub title: String,
    /// Icon tag for menus and desktop shortcuts.
    pub icon_id: String,
    /// Start-menu placement; `None` keeps the app out of the menu.
    pub start_menu_group: Option<StartMenuGroup>,
    /// Whether a desktop shortcut is generated for the app.
    pub show_on_desktop: bool,
}

/// Factory invoked on launch to produce the window configuration.
pub type LaunchFactory = Box<dyn Fn() -> LaunchFuture>;

/// A registered application: presentation metadata plus its launch factory.
pub struct AppDefinition {
    descriptor: AppDescriptor,
    factory: LaunchFactory,
}

impl AppDefinition {
    /// Creates a definition with no start-menu placement and no desktop
    /// shortcut; use the builder methods to opt in.
    pub fn new(
        id: ActionId,
        title: impl Into<String>,
        icon_id: impl Into<String>,
        factory: LaunchFactory,
    ) -> Self {
        Self {
            descriptor: AppDescriptor {
                id,
                title: title.into(),
                icon_id: icon_id.into(),
                start_menu_group: None,
                show_on_desktop: false,
            },
            factory,
        }
    }

    /// Places the app in the given start-menu group.
    pub fn with_start_menu_group(mut self, group: StartMenuGroup) -> Self {
        self.descriptor.start_menu_group = Some(group);
        self
    }

    /// Generates a desktop shortcut for the app.
    pub fn with_desktop_icon(mut self) -> Self {
        self.descriptor.show_on_desktop = true;
        self
    }

    /// Presentation metadata for this definition.
    pub fn descriptor(&self) -> &AppDescriptor {
        &self.descriptor
    }
}

impl fmt::Debug for AppDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppDefinition")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Registry of launchable applications keyed by [`ActionId`].
///
/// Registration order is preserved; it determines desktop shortcut order and
/// breaks no ties elsewhere.
#[derive(Default)]
pub struct AppRegistry {
    apps: RefCell<Vec<AppDefinition>>,
}

impl AppRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an application. A duplicate id is skipped with a warning;
    /// the first registration wins.
    pub fn register(&self, app: AppDefinition) {
        let mut apps = self.apps.borrow_mut();
        if apps.iter().any(|existing| existing.descriptor.id == app.descriptor.id) {
            log::warn!(
                "ignoring duplicate app registration for `{}`",
                app.descriptor.id
            );
            return;
        }
        apps.push(app);
    }

    /// Registers a batch of applications in order.
    pub fn register_all(&self, apps: impl IntoIterator<Item = AppDefinition>) {
        for app in apps {
            self.register(app);
        }
    }

    /// Whether an application is registered under `id`.
    pub fn has_app(&self, id: &ActionId) -> bool {
        self.apps
            .borrow()
            .iter()
            .any(|app| app.descriptor.id == *id)
    }

    /// Launches the application registered under `id` and hands the produced
    /// configuration to `windows`.
    ///
    /// Returns `false`, after logging a warning, when the id is unknown or
    /// the factory fails; launch failures never escape as errors. The
    /// registry is not borrowed across the factory await, so factories may
    /// register or launch further apps while suspended.
    pub async fn launch(&self, id: &ActionId, windows: &WindowManager) -> bool {
        let future = {
            let apps = self.apps.borrow();
            let Some(app) = apps.iter().find(|app| app.descriptor.id == *id) else {
                log::warn!("launch requested for unknown app `{id}`");
                return false;
            };
            (app.factory)()
        };

        match future.await {
            Ok(config) => {
                windows.create_window(config);
                true
            }
            Err(error) => {
                log::warn!("launch of `{id}` failed: {error}");
                false
            }
        }
    }

    /// Descriptors of start-menu apps, sorted by group rank then title.
    pub fn start_menu_apps(&self) -> Vec<AppDescriptor> {
        let mut entries: Vec<AppDescriptor> = self
            .apps
            .borrow()
            .iter()
            .map(AppDefinition::descriptor)
            .filter(|descriptor| descriptor.start_menu_group.is_some())
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            let rank_a = a.start_menu_group.map(StartMenuGroup::rank).unwrap_or(u8::MAX);
            let rank_b = b.start_menu_group.map(StartMenuGroup::rank).unwrap_or(u8::MAX);
            rank_a.cmp(&rank_b).then_with(|| a.title.cmp(&b.title))
        });
        entries
    }

    /// Descriptors of desktop-shortcut apps, in registration order.
    pub fn desktop_apps(&self) -> Vec<AppDescriptor> {
        self.apps
            .borrow()
            .iter()
            .map(AppDefinition::descriptor)
            .filter(|descriptor| descriptor.show_on_desktop)
            .cloned()
            .collect()
    }
}
