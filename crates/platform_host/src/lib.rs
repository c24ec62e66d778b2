//! Read-only host data source and time helpers for the kiosk desktop.
//!
//! This crate is the boundary to the machine the kiosk runs on: formatted
//! date/time breakdowns, the hardware profile, live CPU/memory stats, and the
//! drive listing. Every query degrades to a locally computed fallback when
//! the underlying source fails; host failures surface as log entries, never
//! as user-facing errors.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod service;
pub mod time;
pub mod types;

pub use service::{local_datetime, HostInfoError, NativeSystemInfo, SystemInfoSource};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
pub use types::{DateTimeInfo, DriveInfo, HardwareProfile, SystemStats};
