//! # devicebox-domain
//!
//! Pure data model for the DeviceBox appliance dashboard.
//!
//! ## Responsibilities
//! - Wire types for every backend API payload: telemetry snapshots,
//!   update availability, peripheral catalogs and device records
//! - Load-level thresholds and their indicator mapping
//! - Display formatting: byte sizes, percentages, uptime, timestamps
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! It must never import anything from the dashboard crate or from
//! browser/network crates; the dashboard consumes it, not the reverse.

pub mod device;
pub mod system;
pub mod time;
pub mod update;
