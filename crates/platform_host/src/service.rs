//! System information source contract and the native implementation.

use chrono::Local;
use sysinfo::System;
use thiserror::Error;

use crate::types::{DateTimeInfo, DriveInfo, HardwareProfile, SystemStats};

/// Error raised when a host information query cannot be served.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostInfoError {
    /// The underlying source is missing or failed to respond.
    #[error("host info unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of host information.
///
/// Queries may fail; callers degrade to a locally computed fallback (at
/// minimum [`local_datetime`]) and surface the failure only as a log entry.
pub trait SystemInfoSource {
    /// Current date/time breakdown.
    fn datetime(&self) -> Result<DateTimeInfo, HostInfoError>;

    /// Hardware profile of the host machine.
    fn hardware_profile(&self) -> Result<HardwareProfile, HostInfoError>;

    /// Live CPU/memory statistics.
    fn system_stats(&self) -> Result<SystemStats, HostInfoError>;

    /// Mounted drive listing.
    fn drives(&self) -> Result<Vec<DriveInfo>, HostInfoError>;
}

/// Computes the date/time breakdown locally. Infallible fallback for clock
/// display when the host source is unavailable.
pub fn local_datetime() -> DateTimeInfo {
    let now = Local::now();
    DateTimeInfo {
        time_12h: now.format("%I:%M %p").to_string(),
        time_24h: now.format("%H:%M").to_string(),
        date_short: now.format("%m/%d/%Y").to_string(),
        date_long: now.format("%B %d, %Y").to_string(),
        day_of_week: now.format("%A").to_string(),
        timestamp: now.timestamp(),
    }
}

/// [`SystemInfoSource`] backed by the local machine.
#[derive(Debug, Default)]
pub struct NativeSystemInfo;

impl NativeSystemInfo {
    /// Creates a native source reading from the local machine.
    pub fn new() -> Self {
        Self
    }
}

impl SystemInfoSource for NativeSystemInfo {
    fn datetime(&self) -> Result<DateTimeInfo, HostInfoError> {
        Ok(local_datetime())
    }

    fn hardware_profile(&self) -> Result<HardwareProfile, HostInfoError> {
        // Device-tree model is only present on boards like the Pi; a plain
        // desktop falls back to a generic model name.
        let model = std::fs::read_to_string("/sys/firmware/devicetree/base/model")
            .unwrap_or_else(|_| "Desktop Computer".to_string())
            .trim_matches('\0')
            .trim()
            .to_string();

        let sys = System::new_all();
        Ok(HardwareProfile {
            model,
            ram_mb: sys.total_memory() / 1024 / 1024,
            os_name: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            hostname: System::host_name().unwrap_or_else(|| "localhost".to_string()),
        })
    }

    fn system_stats(&self) -> Result<SystemStats, HostInfoError> {
        let mut sys = System::new_all();
        sys.refresh_all();
        Ok(SystemStats {
            cpu_usage: sys.global_cpu_usage(),
            total_memory: sys.total_memory(),
            used_memory: sys.used_memory(),
            available_memory: sys.available_memory(),
            cpu_count: sys.cpus().len(),
        })
    }

    fn drives(&self) -> Result<Vec<DriveInfo>, HostInfoError> {
        let drives = sysinfo::Disks::new_with_refreshed_list()
            .iter()
            .map(|disk| DriveInfo {
                name: disk.name().to_string_lossy().to_string(),
                mount_point: disk.mount_point().to_string_lossy().to_string(),
                total_space: disk.total_space(),
                available_space: disk.available_space(),
                is_removable: disk.is_removable(),
            })
            .collect();
        Ok(drives)
    }
}
