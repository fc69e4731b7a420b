//! HTTP API client wrapping `gloo-net` for calls to `/api/*`.
//!
//! Every response goes through [`decode`], which folds the three failure
//! classes into [`ApiError`]: transport failures, backend-reported errors
//! (a JSON `error` field, which the backend emits even with HTTP 200), and
//! malformed response shapes.

use devicebox_domain::device::{
    AddDeviceRequest, AvailableDevice, ConfiguredDeviceMap, DeviceTypeCatalog, TestKind,
    TestOutcome,
};
use devicebox_domain::system::SystemStatus;
use devicebox_domain::update::{UpdateReport, UpdateStatus};
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Error returned by API client methods. The message is user-facing and is
/// surfaced verbatim in toasts and panel placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Decode a JSON response body, honouring the backend error convention.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let message = match resp.json::<Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(Value::as_str)
                .map_or_else(|| format!("HTTP {}", resp.status()), ToString::to_string),
            Err(_) => format!("HTTP {}", resp.status()),
        };
        return Err(ApiError { message });
    }

    let body: Value = resp.json().await?;
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Err(ApiError {
            message: error.to_string(),
        });
    }
    serde_json::from_value(body).map_err(|err| ApiError {
        message: format!("unexpected response shape: {err}"),
    })
}

/// Decode a response where only the backend acknowledgement matters.
async fn decode_ack(resp: Response) -> Result<(), ApiError> {
    let _body: Value = decode(resp).await?;
    Ok(())
}

/// Fetch the current telemetry snapshot.
pub async fn fetch_status() -> Result<SystemStatus, ApiError> {
    decode(Request::get("/api/status").send().await?).await
}

/// Ask the backend whether a firmware update is available.
pub async fn check_updates() -> Result<UpdateStatus, ApiError> {
    decode(Request::get("/api/check-updates").send().await?).await
}

/// Apply the pending update. Not retried automatically by design.
pub async fn perform_update() -> Result<UpdateReport, ApiError> {
    decode(Request::post("/api/update").send().await?).await
}

/// Restart the appliance. Not retried automatically by design.
pub async fn reboot() -> Result<(), ApiError> {
    decode_ack(Request::post("/api/reboot").send().await?).await
}

/// Fetch the static device type catalog.
pub async fn fetch_device_types() -> Result<DeviceTypeCatalog, ApiError> {
    decode(Request::get("/api/devices/types").send().await?).await
}

/// Fetch unconfigured peripherals currently visible on the host bus.
pub async fn fetch_available_devices() -> Result<Vec<AvailableDevice>, ApiError> {
    decode(Request::get("/api/devices/available").send().await?).await
}

/// Fetch configured peripherals, keyed by their server-assigned id.
pub async fn fetch_devices() -> Result<ConfiguredDeviceMap, ApiError> {
    decode(Request::get("/api/devices").send().await?).await
}

/// Register a detected peripheral under a user-chosen classification.
pub async fn add_device(request: &AddDeviceRequest) -> Result<(), ApiError> {
    decode_ack(
        Request::post("/api/devices")
            .json(request)?
            .send()
            .await?,
    )
    .await
}

/// Establish the connection to a configured device.
pub async fn connect_device(id: &str) -> Result<(), ApiError> {
    let url = format!("/api/devices/{id}/connect");
    decode_ack(Request::post(&url).send().await?).await
}

/// Run a diagnostic test against a configured device.
pub async fn test_device(id: &str, kind: TestKind) -> Result<TestOutcome, ApiError> {
    #[derive(Serialize)]
    struct TestRequest {
        test_type: TestKind,
    }

    let url = format!("/api/devices/{id}/test");
    decode(
        Request::post(&url)
            .json(&TestRequest { test_type: kind })?
            .send()
            .await?,
    )
    .await
}

/// Deregister a configured device.
pub async fn remove_device(id: &str) -> Result<(), ApiError> {
    let url = format!("/api/devices/{id}");
    decode_ack(Request::delete(&url).send().await?).await
}
