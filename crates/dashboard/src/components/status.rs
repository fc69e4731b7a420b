//! Telemetry panels: system overview, CPU, memory, storage, and host info.
//!
//! Every panel body is re-rendered wholesale from the cached
//! [`Section<SystemStatus>`]; a fetch error swaps the body for an
//! [`ErrorState`] placeholder.

use devicebox_domain::system::{self, LoadLevel};
use devicebox_domain::time;
use leptos::prelude::*;

use crate::components::{ErrorState, Loading};
use crate::controller::use_dashboard;
use crate::page;
use crate::refresh::Section;

/// A single label/value line inside a status panel.
#[component]
fn StatusRow(
    #[prop(into)] label: String,
    #[prop(into)] value: String,
) -> impl IntoView {
    view! {
        <div class="status-item">
            <span class="status-label">{label}</span>
            <span class="status-value">{value}</span>
        </div>
    }
}

/// A label line with a load-level indicator dot.
#[component]
fn IndicatorRow(#[prop(into)] label: String, level: LoadLevel) -> impl IntoView {
    view! {
        <div class="status-item">
            <span class="status-label">{label}</span>
            <span class="status-value">
                <span class=format!("status-indicator {}", level.css_class())></span>
                " "
                {level.label()}
            </span>
        </div>
    }
}

/// System overview panel with the reboot control.
#[component]
pub fn SystemPanel() -> impl IntoView {
    let dashboard = use_dashboard();
    let system = dashboard.system;
    let countdown = dashboard.reboot_countdown;

    let on_reboot = move |_| {
        if page::confirm("Reboot the appliance now?") {
            dashboard.reboot();
        }
    };

    view! {
        <section class="panel" id="system-panel">
            <header class="panel-header">
                <h2>"System"</h2>
                <button class="btn btn-danger" on:click=on_reboot>"Reboot"</button>
            </header>
            {move || {
                countdown.get().map(|remaining| {
                    view! {
                        <p class="reboot-countdown">
                            {format!("Rebooting in {remaining}s\u{2026}")}
                        </p>
                    }
                })
            }}
            {move || match system.get() {
                Section::Loading => view! { <Loading/> }.into_any(),
                Section::Failed(message) => view! { <ErrorState message/> }.into_any(),
                Section::Ready(status) => {
                    view! {
                        <StatusRow label="Hostname" value=status.hostname.clone()/>
                        <StatusRow label="Uptime" value=time::format_uptime(status.uptime)/>
                        <StatusRow label="Temperature" value=status.temperature_display()/>
                        <div class="status-item">
                            <span class="status-label">"Status"</span>
                            <span class="status-value">
                                <span class="status-indicator online"></span>
                                " Online"
                            </span>
                        </div>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

/// CPU panel: model, usage, and load indicator.
#[component]
pub fn CpuPanel() -> impl IntoView {
    let system = use_dashboard().system;

    view! {
        <section class="panel" id="cpu-panel">
            <h2>"CPU"</h2>
            {move || match system.get() {
                Section::Loading => view! { <Loading/> }.into_any(),
                Section::Failed(message) => view! { <ErrorState message/> }.into_any(),
                Section::Ready(status) => {
                    let model = status
                        .cpu_model
                        .clone()
                        .unwrap_or_else(|| "\u{2014}".to_string());
                    view! {
                        <StatusRow label="Model" value=model/>
                        <StatusRow label="Usage" value=system::format_percent(status.cpu_percent)/>
                        <IndicatorRow label="Load" level=LoadLevel::for_cpu(status.cpu_percent)/>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

/// Memory panel: used/total, usage percentage, and load indicator.
#[component]
pub fn MemoryPanel() -> impl IntoView {
    let system = use_dashboard().system;

    view! {
        <section class="panel" id="memory-panel">
            <h2>"Memory"</h2>
            {move || match system.get() {
                Section::Loading => view! { <Loading/> }.into_any(),
                Section::Failed(message) => view! { <ErrorState message/> }.into_any(),
                Section::Ready(status) => {
                    let percent = status.memory_percent();
                    view! {
                        <StatusRow label="Used" value=system::format_bytes(status.memory_used)/>
                        <StatusRow label="Total" value=system::format_bytes(status.memory_total)/>
                        <StatusRow label="Usage" value=system::format_percent(percent)/>
                        <IndicatorRow label="Load" level=LoadLevel::for_memory(percent)/>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

/// Storage panel: used/total, usage percentage, and load indicator.
#[component]
pub fn StoragePanel() -> impl IntoView {
    let system = use_dashboard().system;

    view! {
        <section class="panel" id="storage-panel">
            <h2>"Storage"</h2>
            {move || match system.get() {
                Section::Loading => view! { <Loading/> }.into_any(),
                Section::Failed(message) => view! { <ErrorState message/> }.into_any(),
                Section::Ready(status) => {
                    let percent = status.disk_percent();
                    view! {
                        <StatusRow label="Used" value=system::format_bytes(status.disk_used)/>
                        <StatusRow label="Total" value=system::format_bytes(status.disk_total)/>
                        <StatusRow label="Usage" value=system::format_percent(percent)/>
                        <IndicatorRow label="Load" level=LoadLevel::for_disk(percent)/>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

/// Host information panel: platform, CPU model, and snapshot time.
#[component]
pub fn InfoPanel() -> impl IntoView {
    let system = use_dashboard().system;

    view! {
        <section class="panel" id="info-panel">
            <h2>"Host"</h2>
            {move || match system.get() {
                Section::Loading => view! { <Loading/> }.into_any(),
                Section::Failed(message) => view! { <ErrorState message/> }.into_any(),
                Section::Ready(status) => {
                    let platform = status
                        .platform
                        .clone()
                        .unwrap_or_else(|| "\u{2014}".to_string());
                    let cpu_model = status
                        .cpu_model
                        .clone()
                        .unwrap_or_else(|| "\u{2014}".to_string());
                    view! {
                        <StatusRow label="Operating system" value=platform/>
                        <StatusRow label="Hostname" value=status.hostname.clone()/>
                        <StatusRow label="CPU model" value=cpu_model/>
                        <StatusRow
                            label="Last updated"
                            value=time::format_timestamp(status.timestamp)
                        />
                    }
                    .into_any()
                }
            }}
        </section>
    }
}
