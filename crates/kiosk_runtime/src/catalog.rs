//! Built-in application catalog for the kiosk desktop.
//!
//! Each built-in app is a singleton window keyed by a fixed id; relaunching
//! one refocuses the existing window. Window bodies are static markup
//! generated from the host information source at launch time.

use std::rc::Rc;

use futures::future::FutureExt;
use kiosk_app_contract::{
    ActionId, WindowConfig, WindowContent, WindowFlags, WindowId, WindowRect,
};
use platform_host::{DriveInfo, HardwareProfile, SystemInfoSource, SystemStats};

use crate::desktop::DesktopIcon;
use crate::registry::{AppDefinition, AppRegistry, StartMenuGroup};

/// Builds the standard application set, reading host details from `info`.
pub fn builtin_apps(info: Rc<dyn SystemInfoSource>) -> Vec<AppDefinition> {
    vec![
        file_browser_app(Rc::clone(&info)),
        system_monitor_app(Rc::clone(&info)),
        settings_app(info),
        run_app(),
        shutdown_app(),
    ]
}

/// Generates desktop shortcuts for every registered app that opted in,
/// laid out top to bottom in a single column.
pub fn default_desktop_icons(registry: &AppRegistry) -> Vec<DesktopIcon> {
    registry
        .desktop_apps()
        .into_iter()
        .enumerate()
        .map(|(row, descriptor)| DesktopIcon {
            id: descriptor.id.as_str().to_string(),
            label: descriptor.title,
            icon_id: descriptor.icon_id,
            action: descriptor.id,
            position: (row as u32, 0),
        })
        .collect()
}

fn file_browser_app(info: Rc<dyn SystemInfoSource>) -> AppDefinition {
    AppDefinition::new(
        ActionId::trusted("file-browser"),
        "My Computer",
        "computer",
        Box::new(move || {
            let info = Rc::clone(&info);
            async move {
                let drives = info.drives().unwrap_or_else(|error| {
                    log::warn!("drive listing unavailable: {error}");
                    Vec::new()
                });
                let mut config = WindowConfig::new("My Computer");
                config.id = Some(WindowId::new("file-browser"));
                config.icon_id = Some("computer".to_string());
                config.content = WindowContent::Markup(render_drives(&drives));
                Ok(config)
            }
            .boxed_local()
        }),
    )
    .with_start_menu_group(StartMenuGroup::Primary)
    .with_desktop_icon()
}

fn system_monitor_app(info: Rc<dyn SystemInfoSource>) -> AppDefinition {
    AppDefinition::new(
        ActionId::trusted("system-monitor"),
        "System Monitor",
        "monitor",
        Box::new(move || {
            let info = Rc::clone(&info);
            async move {
                let mut config = WindowConfig::new("System Monitor");
                config.id = Some(WindowId::new("system-monitor"));
                config.icon_id = Some("monitor".to_string());
                config.content = match info.system_stats() {
                    Ok(stats) => WindowContent::Markup(render_stats(&stats)),
                    Err(error) => {
                        log::warn!("system stats unavailable: {error}");
                        WindowContent::Markup(render_unavailable("System statistics"))
                    }
                };
                Ok(config)
            }
            .boxed_local()
        }),
    )
    .with_start_menu_group(StartMenuGroup::Primary)
}

fn settings_app(info: Rc<dyn SystemInfoSource>) -> AppDefinition {
    AppDefinition::new(
        ActionId::trusted("settings"),
        "Settings",
        "gear",
        Box::new(move || {
            let info = Rc::clone(&info);
            async move {
                let mut config = WindowConfig::new("Settings");
                config.id = Some(WindowId::new("settings"));
                config.icon_id = Some("gear".to_string());
                config.content = match info.hardware_profile() {
                    Ok(profile) => WindowContent::Markup(render_profile(&profile)),
                    Err(error) => {
                        log::warn!("hardware profile unavailable: {error}");
                        WindowContent::Markup(render_unavailable("Hardware profile"))
                    }
                };
                Ok(config)
            }
            .boxed_local()
        }),
    )
    .with_start_menu_group(StartMenuGroup::Secondary)
}

fn run_app() -> AppDefinition {
    AppDefinition::new(
        ActionId::trusted("run"),
        "Run",
        "run",
        Box::new(|| {
            async {
                let mut config = WindowConfig::new("Run");
                config.id = Some(WindowId::new("run"));
                config.icon_id = Some("run".to_string());
                config.rect = Some(WindowRect {
                    x: 80,
                    y: 420,
                    w: 360,
                    h: 160,
                });
                config.min_size.h = 120;
                config.flags = WindowFlags {
                    resizable: false,
                    maximizable: false,
                    ..WindowFlags::default()
                };
                config.content =
                    WindowContent::Markup("<prompt label=\"Open:\"/>".to_string());
                Ok(config)
            }
            .boxed_local()
        }),
    )
    .with_start_menu_group(StartMenuGroup::Secondary)
}

fn shutdown_app() -> AppDefinition {
    AppDefinition::new(
        ActionId::trusted("shutdown"),
        "Power",
        "power",
        Box::new(|| {
            async {
                let mut config = WindowConfig::new("Power");
                config.id = Some(WindowId::new("shutdown"));
                config.icon_id = Some("power".to_string());
                config.rect = Some(WindowRect {
                    x: 440,
                    y: 280,
                    w: 400,
                    h: 200,
                });
                config.min_size.h = 140;
                config.flags = WindowFlags {
                    resizable: false,
                    minimizable: false,
                    maximizable: false,
                    modal: true,
                    ..WindowFlags::default()
                };
                config.content = WindowContent::Markup(
                    "<confirm prompt=\"What do you want the computer to do?\"/>".to_string(),
                );
                Ok(config)
            }
            .boxed_local()
        }),
    )
    .with_start_menu_group(StartMenuGroup::Power)
}

fn render_drives(drives: &[DriveInfo]) -> String {
    let mut markup = String::from("<list title=\"Drives\">");
    for drive in drives {
        let total_gb = drive.total_space / 1_000_000_000;
        let free_gb = drive.available_space / 1_000_000_000;
        markup.push_str(&format!(
            "<item label=\"{} ({})\" detail=\"{} GB free of {} GB\" removable=\"{}\"/>",
            drive.name, drive.mount_point, free_gb, total_gb, drive.is_removable
        ));
    }
    markup.push_str("</list>");
    markup
}

fn render_stats(stats: &SystemStats) -> String {
    let used_mb = stats.used_memory / 1024 / 1024;
    let total_mb = stats.total_memory / 1024 / 1024;
    format!(
        "<stats cpu=\"{:.1}%\" cores=\"{}\" memory=\"{} MB / {} MB\"/>",
        stats.cpu_usage, stats.cpu_count, used_mb, total_mb
    )
}

fn render_profile(profile: &HardwareProfile) -> String {
    format!(
        "<profile model=\"{}\" os=\"{} {}\" hostname=\"{}\" ram=\"{} MB\"/>",
        profile.model, profile.os_name, profile.os_version, profile.hostname, profile.ram_mb
    )
}

fn render_unavailable(subject: &str) -> String {
    format!("<notice text=\"{subject} is unavailable on this host.\"/>")
}
