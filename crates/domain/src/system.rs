//! System telemetry snapshot and the load-level indicator thresholds.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One telemetry snapshot as returned by `GET /api/status`.
///
/// The snapshot is transient: the dashboard overwrites its cache wholesale
/// on every successful fetch and never persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub hostname: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub cpu_model: Option<String>,
    pub cpu_percent: f64,
    pub memory_used: u64,
    pub memory_total: u64,
    #[serde(default)]
    memory_percent: Option<f64>,
    pub disk_used: u64,
    pub disk_total: u64,
    #[serde(default)]
    disk_percent: Option<f64>,
    /// Seconds since boot.
    pub uptime: f64,
    /// CPU temperature in °C; absent on hosts without a thermal zone.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Backend-local time of the snapshot, ISO 8601 without offset.
    pub timestamp: NaiveDateTime,
}

impl SystemStatus {
    /// Memory usage percentage, preferring the backend-computed value.
    #[must_use]
    pub fn memory_percent(&self) -> f64 {
        self.memory_percent
            .unwrap_or_else(|| percent_of(self.memory_used, self.memory_total))
    }

    /// Disk usage percentage, preferring the backend-computed value.
    #[must_use]
    pub fn disk_percent(&self) -> f64 {
        self.disk_percent
            .unwrap_or_else(|| percent_of(self.disk_used, self.disk_total))
    }

    /// Temperature formatted to one decimal, or `n/a` when unavailable.
    #[must_use]
    pub fn temperature_display(&self) -> String {
        self.temperature
            .map_or_else(|| "n/a".to_string(), |t| format!("{t:.1}\u{00b0}C"))
    }
}

fn percent_of(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = used as f64 / total as f64 * 100.0;
    pct
}

/// Qualitative load classification backing the panel indicator dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadLevel {
    Normal,
    High,
    Critical,
}

impl LoadLevel {
    /// Classify CPU usage: below 50 % is normal, below 80 % high.
    #[must_use]
    pub fn for_cpu(percent: f64) -> Self {
        Self::from_thresholds(percent, 50.0, 80.0)
    }

    /// Classify memory usage: below 70 % is normal, below 90 % high.
    #[must_use]
    pub fn for_memory(percent: f64) -> Self {
        Self::from_thresholds(percent, 70.0, 90.0)
    }

    /// Classify disk usage: below 80 % is normal, below 95 % high.
    #[must_use]
    pub fn for_disk(percent: f64) -> Self {
        Self::from_thresholds(percent, 80.0, 95.0)
    }

    fn from_thresholds(percent: f64, high: f64, critical: f64) -> Self {
        if percent < high {
            Self::Normal
        } else if percent < critical {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// CSS class of the indicator dot.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Normal => "online",
            Self::High => "warning",
            Self::Critical => "error",
        }
    }

    /// Human-readable label shown next to the indicator.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// Format a byte count with binary prefixes, at most two decimals,
/// trailing zeros trimmed (`1536` → `1.5 KiB`).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = {
        #[allow(clippy::cast_precision_loss)]
        let v = bytes as f64;
        v
    };
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Format a percentage to one decimal place with a `%` suffix.
#[must_use]
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "hostname": "devicebox",
            "platform": "Linux-6.6.20-rpi-aarch64",
            "cpu_model": "Raspberry Pi 5 Model B Rev 1.0",
            "cpu_percent": 45.2,
            "memory_used": 2147483648,
            "memory_total": 8589934592,
            "memory_percent": 92.0,
            "disk_used": 10737418240,
            "disk_total": 32212254720,
            "disk_percent": 99.1,
            "uptime": 93784.5,
            "temperature": 47.25,
            "timestamp": "2026-08-30T12:34:56.789012"
        }"#
    }

    #[test]
    fn should_decode_full_status_payload() {
        let status: SystemStatus = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(status.hostname, "devicebox");
        assert!((status.cpu_percent - 45.2).abs() < f64::EPSILON);
        assert_eq!(status.memory_total, 8_589_934_592);
        assert_eq!(status.temperature_display(), "47.2\u{00b0}C");
    }

    #[test]
    fn should_prefer_backend_percentages_over_computed_ones() {
        let status: SystemStatus = serde_json::from_str(sample_json()).unwrap();
        assert!((status.memory_percent() - 92.0).abs() < f64::EPSILON);
        assert!((status.disk_percent() - 99.1).abs() < f64::EPSILON);
    }

    #[test]
    fn should_compute_percentages_when_backend_omits_them() {
        let json = r#"{
            "hostname": "box",
            "cpu_percent": 1.0,
            "memory_used": 25,
            "memory_total": 100,
            "disk_used": 0,
            "disk_total": 0,
            "uptime": 60.0,
            "timestamp": "2026-08-30T00:00:00"
        }"#;
        let status: SystemStatus = serde_json::from_str(json).unwrap();
        assert!((status.memory_percent() - 25.0).abs() < f64::EPSILON);
        assert!((status.disk_percent() - 0.0).abs() < f64::EPSILON);
        assert_eq!(status.temperature_display(), "n/a");
    }

    #[test]
    fn should_classify_cpu_memory_and_disk_independently() {
        // 45.2 / 92.0 / 99.1 — normal, critical, critical.
        assert_eq!(LoadLevel::for_cpu(45.2), LoadLevel::Normal);
        assert_eq!(LoadLevel::for_memory(92.0), LoadLevel::Critical);
        assert_eq!(LoadLevel::for_disk(99.1), LoadLevel::Critical);
    }

    #[test]
    fn should_use_per_metric_thresholds_at_boundaries() {
        assert_eq!(LoadLevel::for_cpu(50.0), LoadLevel::High);
        assert_eq!(LoadLevel::for_cpu(80.0), LoadLevel::Critical);
        assert_eq!(LoadLevel::for_memory(69.9), LoadLevel::Normal);
        assert_eq!(LoadLevel::for_memory(90.0), LoadLevel::Critical);
        assert_eq!(LoadLevel::for_disk(80.0), LoadLevel::High);
        assert_eq!(LoadLevel::for_disk(94.9), LoadLevel::High);
    }

    #[test]
    fn should_map_load_levels_to_indicator_classes() {
        assert_eq!(LoadLevel::Normal.css_class(), "online");
        assert_eq!(LoadLevel::High.css_class(), "warning");
        assert_eq!(LoadLevel::Critical.css_class(), "error");
        assert_eq!(LoadLevel::Critical.label(), "Critical");
    }

    #[test]
    fn should_format_bytes_with_binary_prefixes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1 KiB");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(2_147_483_648), "2 GiB");
        assert_eq!(format_bytes(1_649_267_441_664), "1.5 TiB");
    }

    #[test]
    fn should_format_percentages_to_one_decimal() {
        assert_eq!(format_percent(45.25), "45.2%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(99.96), "100.0%");
    }
}
