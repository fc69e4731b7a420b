//! The dashboard controller: single owner of the view-model cache and the
//! entry point for every backend command.
//!
//! One `Dashboard` is created per session by the home page and injected into
//! the component tree through Leptos context; event handlers reach it with
//! [`use_dashboard`] instead of an ambient global. Each cached resource is a
//! [`Section`] signal guarded by its own [`RefreshGate`], and every mutating
//! command goes through the [`CommandGuard`].

use devicebox_domain::device::{
    AddDeviceRequest, AvailableDevice, ConfiguredDevice, ConfiguredDeviceMap, DeviceTypeCatalog,
    TestKind, TestOutcome,
};
use devicebox_domain::system::SystemStatus;
use devicebox_domain::update::UpdateStatus;
use futures::join;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::toast::ToastProvider;
use crate::guard::CommandGuard;
use crate::page;
use crate::polling::UPDATE_CHECK_SECS;
use crate::refresh::{RefreshGate, Section};

/// Delay between a successful update and the page reload, giving the
/// backend time to restart into the new version.
const RELOAD_DELAY_MS: u32 = 2_000;
/// Start value of the cosmetic reboot countdown (1 Hz).
const REBOOT_COUNTDOWN_SECS: u8 = 10;

/// Result of the most recent device diagnostic, shown in the test panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TestReport {
    pub device_name: String,
    pub outcome: Result<TestOutcome, String>,
}

/// Session-wide dashboard state and commands.
#[derive(Clone)]
pub struct Dashboard {
    pub system: RwSignal<Section<SystemStatus>>,
    pub update: RwSignal<Section<UpdateStatus>>,
    /// Device type catalog; loaded once at startup, immutable afterwards.
    pub catalog: RwSignal<DeviceTypeCatalog>,
    pub available: RwSignal<Section<Vec<AvailableDevice>>>,
    pub configured: RwSignal<Section<ConfiguredDeviceMap>>,
    pub test_result: RwSignal<Option<TestReport>>,

    pub auto_update: RwSignal<bool>,
    /// An update check is in flight (drives the check button state).
    pub checking: RwSignal<bool>,
    /// An update installation is in flight (drives the progress display).
    pub updating: RwSignal<bool>,
    /// Remaining seconds of the reboot countdown, while one is running.
    pub reboot_countdown: RwSignal<Option<u8>>,
    pub last_check: RwSignal<Option<String>>,
    pub next_check: RwSignal<Option<String>>,
    /// The add-device form is open. Closed by the controller on success,
    /// left open on failure so the user can correct the input.
    pub add_form_open: RwSignal<bool>,

    toasts: ToastProvider,
    guard: CommandGuard,
    system_gate: RefreshGate,
    update_gate: RefreshGate,
    available_gate: RefreshGate,
    configured_gate: RefreshGate,
}

/// Access the dashboard controller from Leptos context.
///
/// Must be called below the component that created the [`Dashboard`].
pub fn use_dashboard() -> Dashboard {
    use_context::<Dashboard>().expect("Dashboard not found in context")
}

impl Dashboard {
    #[must_use]
    pub fn new(toasts: ToastProvider) -> Self {
        Self {
            system: RwSignal::new(Section::Loading),
            update: RwSignal::new(Section::Loading),
            catalog: RwSignal::new(DeviceTypeCatalog::new()),
            available: RwSignal::new(Section::Loading),
            configured: RwSignal::new(Section::Loading),
            test_result: RwSignal::new(None),
            auto_update: RwSignal::new(page::stored_auto_update()),
            checking: RwSignal::new(false),
            updating: RwSignal::new(false),
            reboot_countdown: RwSignal::new(None),
            last_check: RwSignal::new(None),
            next_check: RwSignal::new(None),
            add_form_open: RwSignal::new(false),
            toasts: ToastProvider::clone(&toasts),
            guard: CommandGuard::default(),
            system_gate: RefreshGate::default(),
            update_gate: RefreshGate::default(),
            available_gate: RefreshGate::default(),
            configured_gate: RefreshGate::default(),
        }
    }

    /// Kick off the initial parallel fetch of every section. Each fetch has
    /// its own error boundary: one failing section renders its error state
    /// without blocking the others.
    pub fn load_initial(&self) {
        self.load_catalog();
        self.refresh_system_status();
        let this = self.clone();
        spawn_local(async move {
            let _ = this.fetch_update_info().await;
        });
        let this = self.clone();
        spawn_local(async move {
            this.fetch_available().await;
        });
        let this = self.clone();
        spawn_local(async move {
            this.fetch_configured().await;
        });
    }

    fn load_catalog(&self) {
        let this = self.clone();
        spawn_local(async move {
            match api::fetch_device_types().await {
                Ok(catalog) => this.catalog.set(catalog),
                Err(err) => {
                    leptos::logging::warn!("failed to load device type catalog: {err}");
                }
            }
        });
    }

    /// Refresh the telemetry panels (timer tick or manual).
    pub fn refresh_system_status(&self) {
        let this = self.clone();
        spawn_local(async move {
            this.fetch_system().await;
        });
    }

    /// Check for updates. `silent` suppresses the completion toasts (used by
    /// the background timer) but still stamps the last/next-check fields; a
    /// newly found update is announced even in silent mode.
    pub fn check_for_updates(&self, silent: bool) {
        let this = self.clone();
        spawn_local(async move {
            this.checking.set(true);
            let outcome = this.fetch_update_info().await;
            this.checking.set(false);
            this.stamp_update_check();
            match (outcome, silent) {
                (Ok(Some(version)), true) => {
                    this.toasts.info(format!("Update {version} available"));
                }
                (Ok(_), false) => this.toasts.success("Update check complete"),
                (Err(_), false) => this.toasts.error("Update check failed"),
                _ => {}
            }
        });
    }

    /// Apply the pending update. Single-flight: a second invocation while
    /// one is outstanding yields an "already in progress" notice and no
    /// network call. On success the page reloads after a short delay.
    pub fn perform_update(&self) {
        let Some(permit) = self.guard.try_acquire("perform-update") else {
            self.toasts.warning("Update already in progress");
            return;
        };
        let this = self.clone();
        self.updating.set(true);
        spawn_local(async move {
            let _permit = permit;
            match api::perform_update().await {
                Ok(report) if report.success => {
                    let message = report
                        .message
                        .unwrap_or_else(|| "Update completed".to_string());
                    this.toasts.success(message);
                    TimeoutFuture::new(RELOAD_DELAY_MS).await;
                    page::reload();
                }
                Ok(report) => {
                    let message = report.message.unwrap_or_else(|| "Update failed".to_string());
                    this.toasts.error(message);
                }
                Err(err) => this.toasts.error(format!("Update failed: {err}")),
            }
            this.updating.set(false);
        });
    }

    /// Restart the appliance. The countdown is purely cosmetic: it does not
    /// poll to confirm the system actually went down or came back.
    pub fn reboot(&self) {
        let Some(permit) = self.guard.try_acquire("reboot") else {
            self.toasts.warning("Reboot already in progress");
            return;
        };
        let this = self.clone();
        spawn_local(async move {
            let _permit = permit;
            match api::reboot().await {
                Ok(()) => {
                    this.toasts.success("Reboot initiated");
                    for remaining in (0..=REBOOT_COUNTDOWN_SECS).rev() {
                        this.reboot_countdown.set(Some(remaining));
                        if remaining > 0 {
                            TimeoutFuture::new(1_000).await;
                        }
                    }
                    this.reboot_countdown.set(None);
                }
                Err(err) => this.toasts.error(format!("Reboot failed: {err}")),
            }
        });
    }

    /// Register a detected peripheral. On success the configured list is
    /// re-fetched and the form closed; on failure the form stays open.
    pub fn add_device(&self, request: AddDeviceRequest) {
        let Some(permit) = self.guard.try_acquire("add-device") else {
            self.toasts.warning("Add device already in progress");
            return;
        };
        let this = self.clone();
        spawn_local(async move {
            let _permit = permit;
            match api::add_device(&request).await {
                Ok(()) => {
                    this.toasts.success("Device added");
                    this.add_form_open.set(false);
                    this.fetch_configured().await;
                }
                Err(err) => this.toasts.error(format!("Failed to add device: {err}")),
            }
        });
    }

    /// Establish the connection to a configured device, then re-fetch the
    /// list to pick up its new status.
    pub fn connect_device(&self, id: String) {
        let Some(permit) = self.guard.try_acquire("connect-device") else {
            self.toasts.warning("Connect already in progress");
            return;
        };
        let this = self.clone();
        spawn_local(async move {
            let _permit = permit;
            match api::connect_device(&id).await {
                Ok(()) => {
                    this.toasts.success("Device connected");
                    this.fetch_configured().await;
                }
                Err(err) => this.toasts.error(format!("Failed to connect device: {err}")),
            }
        });
    }

    /// Run the type-appropriate diagnostic against a configured device and
    /// publish the structured result to the test panel.
    pub fn test_device(&self, device: &ConfiguredDevice) {
        let Some(permit) = self.guard.try_acquire("test-device") else {
            self.toasts.warning("Device test already in progress");
            return;
        };
        let this = self.clone();
        let id = device.id.clone();
        let device_name = device.name.clone();
        let kind = TestKind::for_device_type(&device.device_type);
        spawn_local(async move {
            let _permit = permit;
            match api::test_device(&id, kind).await {
                Ok(outcome) => {
                    let message = outcome
                        .message
                        .clone()
                        .unwrap_or_else(|| "Device test finished".to_string());
                    if outcome.success {
                        this.toasts.success(message);
                    } else {
                        this.toasts.error(message);
                    }
                    this.test_result.set(Some(TestReport {
                        device_name,
                        outcome: Ok(outcome),
                    }));
                }
                Err(err) => {
                    this.toasts.error(format!("Device test failed: {err}"));
                    this.test_result.set(Some(TestReport {
                        device_name,
                        outcome: Err(err.message),
                    }));
                }
            }
        });
    }

    /// Deregister a device. The caller confirms first; the entry disappears
    /// only after the server acknowledged and the list was re-fetched.
    pub fn remove_device(&self, id: String) {
        let Some(permit) = self.guard.try_acquire("remove-device") else {
            self.toasts.warning("Remove already in progress");
            return;
        };
        let this = self.clone();
        spawn_local(async move {
            let _permit = permit;
            match api::remove_device(&id).await {
                Ok(()) => {
                    this.toasts.success("Device removed");
                    this.fetch_configured().await;
                }
                Err(err) => this.toasts.error(format!("Failed to remove device: {err}")),
            }
        });
    }

    /// Re-fetch both device lists in parallel, with a start/finish toast
    /// pair regardless of individual outcomes.
    pub fn refresh_devices(&self) {
        self.toasts.info("Refreshing devices\u{2026}");
        let this = self.clone();
        spawn_local(async move {
            join!(this.fetch_available(), this.fetch_configured());
            this.toasts.success("Devices refreshed");
        });
    }

    /// Re-fetch every section in parallel, with a start/finish toast pair
    /// regardless of individual outcomes.
    pub fn refresh_all(&self) {
        self.toasts.info("Refreshing dashboard data\u{2026}");
        let this = self.clone();
        spawn_local(async move {
            join!(
                this.fetch_system(),
                async {
                    let _ = this.fetch_update_info().await;
                },
                this.fetch_available(),
                this.fetch_configured(),
            );
            this.toasts.success("Dashboard data refreshed");
        });
    }

    /// Flip the auto-update-check toggle and persist the preference. The
    /// background timer follows this signal.
    pub fn set_auto_update(&self, enabled: bool) {
        self.auto_update.set(enabled);
        page::store_auto_update(enabled);
        if enabled {
            self.toasts.success("Automatic update checks enabled");
            self.next_check
                .set(Some(format!("in {} min", UPDATE_CHECK_SECS / 60)));
        } else {
            self.toasts.info("Automatic update checks disabled");
            self.next_check.set(None);
        }
    }

    async fn fetch_system(&self) {
        let ticket = self.system_gate.begin();
        let result = api::fetch_status().await;
        if self.system_gate.admit(ticket) {
            self.system.set(Section::from(result));
        }
    }

    /// Fetch update availability into the cache; returns the pending
    /// version when one is waiting.
    async fn fetch_update_info(&self) -> Result<Option<String>, ApiError> {
        let ticket = self.update_gate.begin();
        match api::check_updates().await {
            Ok(status) => {
                let pending = status.pending_version().map(ToString::to_string);
                if self.update_gate.admit(ticket) {
                    self.update.set(Section::Ready(status));
                }
                Ok(pending)
            }
            Err(err) => {
                if self.update_gate.admit(ticket) {
                    self.update.set(Section::Failed(err.message.clone()));
                }
                Err(err)
            }
        }
    }

    async fn fetch_available(&self) {
        let ticket = self.available_gate.begin();
        let result = api::fetch_available_devices().await;
        if self.available_gate.admit(ticket) {
            self.available.set(Section::from(result));
        }
    }

    async fn fetch_configured(&self) {
        let ticket = self.configured_gate.begin();
        let result = api::fetch_devices().await;
        if self.configured_gate.admit(ticket) {
            self.configured.set(Section::from(result));
        }
    }

    fn stamp_update_check(&self) {
        self.last_check.set(Some(page::local_time_string()));
        let next = self
            .auto_update
            .get_untracked()
            .then(|| format!("in {} min", UPDATE_CHECK_SECS / 60));
        self.next_check.set(next);
    }
}
