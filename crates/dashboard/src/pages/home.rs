//! The dashboard page: owns the [`Dashboard`] controller, the background
//! timers, and the page-level listeners (visibility, Ctrl+R).

use leptos::prelude::*;

use crate::components::toast::use_toasts;
use crate::components::{
    AvailableDevicesPanel, ConfiguredDevicesPanel, CpuPanel, InfoPanel, MemoryPanel, StoragePanel,
    SystemPanel, UpdatePanel,
};
use crate::controller::Dashboard;
use crate::page;
use crate::polling::{self, Pollers};

#[component]
pub fn Home() -> impl IntoView {
    let dashboard = Dashboard::new(use_toasts());
    provide_context(dashboard.clone());
    dashboard.load_initial();

    let (visible, visibility_watch) = page::use_page_visibility();
    let hotkey_watch = page::use_refresh_hotkey({
        let dashboard = dashboard.clone();
        move || dashboard.refresh_all()
    });

    // The effect owns the timers and the listener guards: when the page is
    // disposed the closure drops, cancelling both intervals and detaching
    // the document listeners.
    let auto_update = dashboard.auto_update;
    let timers_dashboard = dashboard.clone();
    let mut pollers = Pollers::default();
    Effect::new(move |_| {
        let _keep_alive = (&visibility_watch, &hotkey_watch);
        let wanted = polling::wanted(visible.get(), auto_update.get());
        let on_status = {
            let dashboard = timers_dashboard.clone();
            move || dashboard.refresh_system_status()
        };
        let on_update_check = {
            let dashboard = timers_dashboard.clone();
            move || dashboard.check_for_updates(true)
        };
        pollers.apply(wanted, on_status, on_update_check);
    });

    let on_refresh_all = move |_| dashboard.refresh_all();

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"DeviceBox"</h1>
                <button class="btn btn-secondary" id="refresh-all-btn" on:click=on_refresh_all>
                    "Refresh all"
                </button>
            </header>
            <div class="panels-grid">
                <SystemPanel/>
                <CpuPanel/>
                <MemoryPanel/>
                <StoragePanel/>
                <InfoPanel/>
                <UpdatePanel/>
            </div>
            <AvailableDevicesPanel/>
            <ConfiguredDevicesPanel/>
        </div>
    }
}
