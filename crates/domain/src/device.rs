//! Peripheral model — transient bus scan results, the static type catalog,
//! configured devices, and diagnostic test payloads.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bus a peripheral was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Usb,
    Serial,
}

/// Error returned when parsing an unknown device kind.
#[derive(Debug, thiserror::Error)]
#[error("unknown device kind: {0}")]
pub struct UnknownDeviceKind(String);

impl FromStr for DeviceKind {
    type Err = UnknownDeviceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usb" => Ok(Self::Usb),
            "serial" => Ok(Self::Serial),
            other => Err(UnknownDeviceKind(other.to_string())),
        }
    }
}

/// An unconfigured peripheral detected on the host bus.
///
/// Has no stable identity: the list is re-fetched and replaced wholesale on
/// every refresh, and an entry only gains identity once the user configures
/// it through the add command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableDevice {
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// `vendor:product` hex pair, USB devices only.
    #[serde(default)]
    pub vendor_product: Option<String>,
    /// Serial port path, serial devices only.
    #[serde(default)]
    pub port: Option<String>,
}

impl AvailableDevice {
    /// Display name, falling back for devices without a descriptor string.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.description.as_deref().unwrap_or("Unknown device")
    }

    /// Short bus address line, e.g. `USB 04b8:0202` or `Serial /dev/ttyUSB0`.
    #[must_use]
    pub fn bus_label(&self) -> String {
        match self.kind {
            DeviceKind::Usb => format!(
                "USB {}",
                self.vendor_product.as_deref().unwrap_or("unknown")
            ),
            DeviceKind::Serial => {
                format!("Serial {}", self.port.as_deref().unwrap_or("unknown"))
            }
        }
    }
}

/// Connection state of a configured device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Connected,
    Disconnected,
    Error,
}

impl DeviceStatus {
    /// CSS class of the status indicator dot.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
            Self::Error => "Error",
        }
    }
}

/// A peripheral the backend has persisted under a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredDevice {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub model: String,
    pub status: DeviceStatus,
}

/// Catalog entry for one device type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTypeInfo {
    /// Human-readable type name, e.g. "Receipt printer".
    pub name: String,
    /// Supported models in catalog order.
    pub models: Vec<String>,
}

/// Type-tag → catalog entry mapping, loaded once at startup and immutable
/// for the session. `BTreeMap` keeps the render order stable.
pub type DeviceTypeCatalog = BTreeMap<String, DeviceTypeInfo>;

/// Configured devices keyed by their server-assigned id.
pub type ConfiguredDeviceMap = BTreeMap<String, ConfiguredDevice>;

/// Diagnostic test variant, chosen by the device's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestKind {
    #[serde(rename = "test_print")]
    Print,
    #[serde(rename = "test_scan")]
    Scan,
    #[serde(rename = "test_transaction")]
    Transaction,
}

/// Error returned when parsing an unknown test kind.
#[derive(Debug, thiserror::Error)]
#[error("unknown test kind: {0}")]
pub struct UnknownTestKind(String);

impl TestKind {
    /// The appropriate test for a device type tag. Printer-like types get a
    /// print test, which is also the fallback for unknown tags.
    #[must_use]
    pub fn for_device_type(device_type: &str) -> Self {
        match device_type {
            "barcode_scanner" => Self::Scan,
            "card_reader" => Self::Transaction,
            _ => Self::Print,
        }
    }

    /// Wire name sent in the test request body.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Print => "test_print",
            Self::Scan => "test_scan",
            Self::Transaction => "test_transaction",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for TestKind {
    type Err = UnknownTestKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test_print" => Ok(Self::Print),
            "test_scan" => Ok(Self::Scan),
            "test_transaction" => Ok(Self::Transaction),
            other => Err(UnknownTestKind(other.to_string())),
        }
    }
}

/// Structured result of `POST /api/devices/{id}/test`.
///
/// Beyond the pass/fail flag, the backend may attach fields specific to the
/// test kind: the scanned payload, a card transaction reference, or the
/// content that was printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub scan_result: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub test_content: Option<String>,
}

impl TestOutcome {
    /// Formatted `amount currency` pair when both are present.
    #[must_use]
    pub fn amount_display(&self) -> Option<String> {
        let amount = self.amount?;
        let currency = self.currency.as_deref()?;
        Some(format!("{amount:.2} {currency}"))
    }
}

/// Body of `POST /api/devices` — the raw bus descriptor plus the user's
/// classification of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDeviceRequest {
    pub device_type: String,
    pub model: String,
    pub device_info: AvailableDevice,
    pub custom_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_pick_test_kind_from_device_type() {
        for tag in [
            "printer",
            "label_printer",
            "shipping_printer",
            "receipt_printer",
        ] {
            assert_eq!(TestKind::for_device_type(tag), TestKind::Print);
        }
        assert_eq!(
            TestKind::for_device_type("barcode_scanner"),
            TestKind::Scan
        );
        assert_eq!(
            TestKind::for_device_type("card_reader"),
            TestKind::Transaction
        );
        assert_eq!(TestKind::for_device_type("whatever"), TestKind::Print);
    }

    #[test]
    fn should_roundtrip_test_kind_through_wire_name() {
        for kind in [TestKind::Print, TestKind::Scan, TestKind::Transaction] {
            let parsed: TestKind = kind.wire_name().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("test_everything".parse::<TestKind>().is_err());
    }

    #[test]
    fn should_decode_available_usb_device() {
        let device: AvailableDevice = serde_json::from_str(
            r#"{
                "type": "usb",
                "description": "TM-T20II Receipt Printer",
                "manufacturer": "Epson",
                "vendor_product": "04b8:0202"
            }"#,
        )
        .unwrap();
        assert_eq!(device.kind, DeviceKind::Usb);
        assert_eq!(device.display_name(), "TM-T20II Receipt Printer");
        assert_eq!(device.bus_label(), "USB 04b8:0202");
    }

    #[test]
    fn should_decode_available_serial_device_without_description() {
        let device: AvailableDevice =
            serde_json::from_str(r#"{"type": "serial", "port": "/dev/ttyUSB0"}"#).unwrap();
        assert_eq!(device.kind, DeviceKind::Serial);
        assert_eq!(device.display_name(), "Unknown device");
        assert_eq!(device.bus_label(), "Serial /dev/ttyUSB0");
    }

    #[test]
    fn should_decode_configured_device_map_keyed_by_id() {
        let map: ConfiguredDeviceMap = serde_json::from_str(
            r#"{
                "receipt_printer_1_1756500000": {
                    "id": "receipt_printer_1_1756500000",
                    "name": "Bar receipt printer",
                    "type": "receipt_printer",
                    "model": "Epson TM-T20II",
                    "status": "connected"
                },
                "barcode_scanner_2_1756500100": {
                    "id": "barcode_scanner_2_1756500100",
                    "name": "Counter scanner",
                    "type": "barcode_scanner",
                    "model": "Datalogic Touch 65",
                    "status": "disconnected"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        let printer = &map["receipt_printer_1_1756500000"];
        assert_eq!(printer.status, DeviceStatus::Connected);
        assert_eq!(printer.status.css_class(), "connected");
        assert_eq!(
            TestKind::for_device_type(&map["barcode_scanner_2_1756500100"].device_type),
            TestKind::Scan
        );
    }

    #[test]
    fn should_keep_catalog_order_stable() {
        let catalog: DeviceTypeCatalog = serde_json::from_str(
            r#"{
                "printer": {"name": "Document printer", "models": ["Brother HL-L2340DW"]},
                "card_reader": {"name": "Card terminal", "models": ["Ingenico Move/3500"]},
                "barcode_scanner": {"name": "Barcode scanner", "models": []}
            }"#,
        )
        .unwrap();
        let tags: Vec<&str> = catalog.keys().map(String::as_str).collect();
        assert_eq!(tags, vec!["barcode_scanner", "card_reader", "printer"]);
    }

    #[test]
    fn should_decode_transaction_test_outcome_with_extras() {
        let outcome: TestOutcome = serde_json::from_str(
            r#"{
                "success": true,
                "message": "Test transaction approved",
                "transaction_id": "TX-20260830-0001",
                "amount": 1.0,
                "currency": "EUR"
            }"#,
        )
        .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.amount_display().as_deref(), Some("1.00 EUR"));
        assert_eq!(outcome.scan_result, None);
    }

    #[test]
    fn should_serialize_add_device_request_with_raw_descriptor() {
        let request = AddDeviceRequest {
            device_type: "receipt_printer".to_string(),
            model: "Epson TM-T20II".to_string(),
            device_info: AvailableDevice {
                kind: DeviceKind::Usb,
                description: Some("TM-T20II".to_string()),
                manufacturer: Some("Epson".to_string()),
                vendor_product: Some("04b8:0202".to_string()),
                port: None,
            },
            custom_name: "Bar printer".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["device_type"], "receipt_printer");
        assert_eq!(json["device_info"]["type"], "usb");
        assert_eq!(json["custom_name"], "Bar printer");
    }
}
