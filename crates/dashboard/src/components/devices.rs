//! Peripheral panels: detected (unconfigured) devices with the add flow,
//! the configured device grid, and the diagnostic result display.

use devicebox_domain::device::{AddDeviceRequest, AvailableDevice, ConfiguredDevice};
use leptos::prelude::*;

use crate::components::toast::use_toasts;
use crate::components::{ErrorState, Loading};
use crate::controller::use_dashboard;
use crate::page;
use crate::refresh::Section;

/// Unconfigured peripherals detected on the host bus, with the add form.
#[component]
pub fn AvailableDevicesPanel() -> impl IntoView {
    let dashboard = use_dashboard();
    let available = dashboard.available;
    let add_form_open = dashboard.add_form_open;
    let selected: RwSignal<Option<AvailableDevice>> = RwSignal::new(None);

    let on_refresh = move |_| dashboard.refresh_devices();

    view! {
        <section class="panel" id="available-devices">
            <header class="panel-header">
                <h2>"Detected devices"</h2>
                <button class="btn btn-secondary" id="refresh-devices-btn" on:click=on_refresh>
                    "Refresh devices"
                </button>
            </header>
            {move || match available.get() {
                Section::Loading => view! { <Loading message="Scanning for devices\u{2026}"/> }.into_any(),
                Section::Failed(message) => view! { <ErrorState message/> }.into_any(),
                Section::Ready(devices) => {
                    if devices.is_empty() {
                        view! {
                            <p class="no-devices">
                                "No unconfigured devices found. Plug one in and refresh."
                            </p>
                        }
                        .into_any()
                    } else {
                        view! {
                            <ul class="device-list">
                                {devices
                                    .into_iter()
                                    .map(|device| view! { <AvailableDeviceRow device selected/> })
                                    .collect::<Vec<_>>()}
                            </ul>
                        }
                        .into_any()
                    }
                }
            }}
            {move || {
                add_form_open
                    .get()
                    .then(|| selected.get().map(|device| view! { <AddDeviceForm device/> }))
                    .flatten()
            }}
        </section>
    }
}

/// One detected device with its add button.
#[component]
fn AvailableDeviceRow(
    device: AvailableDevice,
    selected: RwSignal<Option<AvailableDevice>>,
) -> impl IntoView {
    let dashboard = use_dashboard();
    let name = device.display_name().to_string();
    let bus = device.bus_label();
    let manufacturer = device.manufacturer.clone();

    let on_add = move |_| {
        selected.set(Some(device.clone()));
        dashboard.add_form_open.set(true);
    };

    view! {
        <li class="device-item">
            <div class="device-info">
                <span class="device-name">{name}</span>
                <span class="device-description">
                    {bus}
                    {manufacturer.map(|m| format!(" \u{2014} {m}"))}
                </span>
            </div>
            <button class="btn btn-primary btn-sm" on:click=on_add>"Add"</button>
        </li>
    }
}

/// Classification form for a detected device: type, model, optional name.
#[component]
fn AddDeviceForm(device: AvailableDevice) -> impl IntoView {
    let dashboard = use_dashboard();
    let toasts = use_toasts();
    let catalog = dashboard.catalog;
    let chosen_type = RwSignal::new(String::new());
    let chosen_model = RwSignal::new(String::new());
    let custom_name = RwSignal::new(String::new());

    let title = device.display_name().to_string();

    let on_cancel = {
        let dashboard = dashboard.clone();
        move |_| dashboard.add_form_open.set(false)
    };
    let on_submit = move |_| {
        let device_type = chosen_type.get_untracked();
        if device_type.is_empty() {
            toasts.warning("Choose a device type first");
            return;
        }
        // Default to the first catalog model when none was picked.
        let model = {
            let picked = chosen_model.get_untracked();
            if picked.is_empty() {
                catalog
                    .get_untracked()
                    .get(&device_type)
                    .and_then(|info| info.models.first().cloned())
                    .unwrap_or_default()
            } else {
                picked
            }
        };
        dashboard.add_device(AddDeviceRequest {
            device_type,
            model,
            device_info: device.clone(),
            custom_name: custom_name.get_untracked(),
        });
    };

    view! {
        <div class="add-device-form">
            <h3>"Configure " {title}</h3>
            <label>
                "Type"
                <select on:change=move |ev| {
                    chosen_type.set(event_target_value(&ev));
                    chosen_model.set(String::new());
                }>
                    <option value="">"Select a type\u{2026}"</option>
                    {move || {
                        catalog
                            .get()
                            .into_iter()
                            .map(|(tag, info)| {
                                let value = tag.clone();
                                view! {
                                    <option value=value selected=move || chosen_type.get() == tag>
                                        {info.name.clone()}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
            </label>
            <label>
                "Model"
                <select on:change=move |ev| chosen_model.set(event_target_value(&ev))>
                    {move || {
                        let tag = chosen_type.get();
                        catalog
                            .get()
                            .get(&tag)
                            .map(|info| info.models.clone())
                            .unwrap_or_default()
                            .into_iter()
                            .map(|model| {
                                let value = model.clone();
                                let label = model.clone();
                                view! {
                                    <option value=value selected=move || chosen_model.get() == model>
                                        {label}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
            </label>
            <label>
                "Name"
                <input
                    type="text"
                    placeholder="Optional custom name"
                    prop:value=move || custom_name.get()
                    on:input=move |ev| custom_name.set(event_target_value(&ev))
                />
            </label>
            <div class="form-actions">
                <button class="btn btn-primary" on:click=on_submit>"Add device"</button>
                <button class="btn btn-secondary" on:click=on_cancel>"Cancel"</button>
            </div>
        </div>
    }
}

/// Grid of configured devices with their per-device actions.
#[component]
pub fn ConfiguredDevicesPanel() -> impl IntoView {
    let dashboard = use_dashboard();
    let configured = dashboard.configured;

    view! {
        <section class="panel" id="configured-devices">
            <h2>"Configured devices"</h2>
            {move || match configured.get() {
                Section::Loading => view! { <Loading message="Loading devices\u{2026}"/> }.into_any(),
                Section::Failed(message) => view! { <ErrorState message/> }.into_any(),
                Section::Ready(devices) => {
                    if devices.is_empty() {
                        view! {
                            <p class="no-devices">"No configured devices yet. Add one to get started."</p>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="devices-grid">
                                {devices
                                    .into_values()
                                    .map(|device| view! { <DeviceCard device/> })
                                    .collect::<Vec<_>>()}
                            </div>
                        }
                        .into_any()
                    }
                }
            }}
            <TestResultPanel/>
        </section>
    }
}

/// One configured device card with connect/test/remove actions.
#[component]
fn DeviceCard(device: ConfiguredDevice) -> impl IntoView {
    let dashboard = use_dashboard();
    let type_name = dashboard
        .catalog
        .get_untracked()
        .get(&device.device_type)
        .map_or_else(|| device.device_type.clone(), |info| info.name.clone());
    let status = device.status;
    let name = device.name.clone();
    let model = device.model.clone();

    let on_connect = {
        let dashboard = dashboard.clone();
        let id = device.id.clone();
        move |_| dashboard.connect_device(id.clone())
    };
    let on_remove = {
        let dashboard = dashboard.clone();
        let id = device.id.clone();
        let name = device.name.clone();
        move |_| {
            if page::confirm(&format!("Remove {name}? This cannot be undone.")) {
                dashboard.remove_device(id.clone());
            }
        }
    };
    let on_test = move |_| dashboard.test_device(&device);

    view! {
        <div class="device-card">
            <div class="device-header">
                <h3>{name}</h3>
                <span class="device-model">{model}</span>
                <span class="device-type">{type_name}</span>
            </div>
            <div class="device-status">
                <span class=format!("status-indicator-small {}", status.css_class())></span>
                <span>{status.label()}</span>
            </div>
            <div class="device-actions">
                <button class="btn btn-primary" on:click=on_connect>"Connect"</button>
                <button class="btn btn-secondary" on:click=on_test>"Test"</button>
                <button class="btn btn-danger" on:click=on_remove>"Remove"</button>
            </div>
        </div>
    }
}

/// Structured result of the most recent device diagnostic.
#[component]
fn TestResultPanel() -> impl IntoView {
    let test_result = use_dashboard().test_result;
    let on_dismiss = move |_| test_result.set(None);

    view! {
        {move || {
            test_result.get().map(|report| {
                let body = match report.outcome {
                    Ok(outcome) => {
                        let verdict = if outcome.success { "Passed" } else { "Failed" };
                        view! {
                            <div class="test-details">
                                <p class="test-verdict">{verdict}</p>
                                {outcome.message.clone().map(|m| view! { <p>{m}</p> })}
                                {outcome
                                    .scan_result
                                    .clone()
                                    .map(|s| view! { <p><strong>"Scanned: "</strong>{s}</p> })}
                                {outcome
                                    .transaction_id
                                    .clone()
                                    .map(|t| view! { <p><strong>"Transaction: "</strong>{t}</p> })}
                                {outcome
                                    .amount_display()
                                    .map(|a| view! { <p><strong>"Amount: "</strong>{a}</p> })}
                                {outcome
                                    .test_content
                                    .clone()
                                    .map(|c| view! { <pre class="test-content">{c}</pre> })}
                            </div>
                        }
                        .into_any()
                    }
                    Err(message) => view! { <p class="error">{message}</p> }.into_any(),
                };
                view! {
                    <div class="test-result">
                        <header class="panel-header">
                            <h3>{"Test result \u{2014} "}{report.device_name}</h3>
                            <button class="btn btn-secondary btn-sm" on:click=on_dismiss>
                                "Dismiss"
                            </button>
                        </header>
                        {body}
                    </div>
                }
            })
        }}
    }
}
