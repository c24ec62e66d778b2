//! Window-lifecycle and event-coordination core for the kiosk desktop shell.
//!
//! This crate tracks open windows, mediates between window state and the
//! taskbar/start-menu representation, and dispatches user actions to
//! application launch logic. Rendering, theming, and the native hardware
//! backend stay behind the contracts in `kiosk_app_contract` and
//! `platform_host`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod desktop;
pub mod events;
pub mod registry;
pub mod taskbar;
pub mod window_manager;

pub use catalog::{builtin_apps, default_desktop_icons};
pub use desktop::{Desktop, DesktopIcon, DesktopKey};
pub use events::{ListenerId, WindowEvent, WindowEventKind};
pub use registry::{AppDefinition, AppDescriptor, AppRegistry, LaunchFactory, StartMenuGroup};
pub use taskbar::{Taskbar, TaskbarIntent, TaskbarItem};
pub use window_manager::{WindowManager, WindowSnapshot, CASCADE_STEP, TASKBAR_BAND_HEIGHT};
