//! Shared host data models.

use serde::{Deserialize, Serialize};

/// Date and time breakdown for the taskbar clock and desktop surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeInfo {
    /// 12-hour clock string, e.g. `03:07 PM`.
    pub time_12h: String,
    /// 24-hour clock string, e.g. `15:07`.
    pub time_24h: String,
    /// Short numeric date, e.g. `08/29/2026`.
    pub date_short: String,
    /// Long prose date, e.g. `August 29, 2026`.
    pub date_long: String,
    /// Weekday name, e.g. `Saturday`.
    pub day_of_week: String,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
}

/// Hardware profile of the host machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareProfile {
    /// Device model name.
    pub model: String,
    /// Installed RAM in megabytes.
    pub ram_mb: u64,
    /// Operating system name.
    pub os_name: String,
    /// Operating system version.
    pub os_version: String,
    /// Host name.
    pub hostname: String,
}

/// Live system statistics for the system monitor pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    /// Global CPU usage percentage.
    pub cpu_usage: f32,
    /// Total memory in bytes.
    pub total_memory: u64,
    /// Used memory in bytes.
    pub used_memory: u64,
    /// Available memory in bytes.
    pub available_memory: u64,
    /// Number of logical CPUs.
    pub cpu_count: usize,
}

/// Mounted drive description for the file browser pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveInfo {
    /// Drive or volume name.
    pub name: String,
    /// Mount point path.
    pub mount_point: String,
    /// Total capacity in bytes.
    pub total_space: u64,
    /// Available capacity in bytes.
    pub available_space: u64,
    /// Whether the drive is removable media.
    pub is_removable: bool,
}
