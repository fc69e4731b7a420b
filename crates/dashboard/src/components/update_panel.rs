//! Update panel: availability display, manual check, apply, and the
//! auto-check toggle with its schedule fields.

use leptos::prelude::*;

use crate::components::{ErrorState, Loading};
use crate::controller::use_dashboard;
use crate::page;
use crate::refresh::Section;

#[component]
pub fn UpdatePanel() -> impl IntoView {
    let dashboard = use_dashboard();
    let update = dashboard.update;
    let checking = dashboard.checking;
    let updating = dashboard.updating;
    let auto_update = dashboard.auto_update;
    let last_check = dashboard.last_check;
    let next_check = dashboard.next_check;

    let on_check = {
        let dashboard = dashboard.clone();
        move |_| dashboard.check_for_updates(false)
    };
    let on_install = {
        let dashboard = dashboard.clone();
        move |_| {
            if page::confirm(
                "Install the update now? The dashboard reloads once the backend has restarted.",
            ) {
                dashboard.perform_update();
            }
        }
    };
    let on_toggle = move |ev| dashboard.set_auto_update(event_target_checked(&ev));

    view! {
        <section class="panel" id="update-panel">
            <h2>"Updates"</h2>
            {move || match update.get() {
                Section::Loading => view! { <Loading message="Checking for updates\u{2026}"/> }.into_any(),
                Section::Failed(message) => view! { <ErrorState message/> }.into_any(),
                Section::Ready(status) => {
                    match status.pending_version().map(ToString::to_string) {
                        Some(version) => {
                            let current = status.current_version.clone();
                            let notes = status.release_notes.clone();
                            let on_install = on_install.clone();
                            view! {
                                <div class="update-available">
                                    <h3>"Update available"</h3>
                                    <p>"Current version: " <strong>{current}</strong></p>
                                    <p>"New version: " <strong>{version}</strong></p>
                                    {notes.map(|notes| view! { <p class="release-notes">{notes}</p> })}
                                    <button
                                        class="btn btn-primary"
                                        id="update-btn"
                                        on:click=on_install
                                        disabled=move || updating.get()
                                    >
                                        "Install update"
                                    </button>
                                </div>
                            }
                            .into_any()
                        }
                        None => view! {
                            <div class="update-current">
                                <h3>"System is up to date"</h3>
                                <p>"Version: " <strong>{status.current_version.clone()}</strong></p>
                            </div>
                        }
                        .into_any(),
                    }
                }
            }}
            {move || {
                updating
                    .get()
                    .then(|| view! { <p class="update-progress">"Installing update\u{2026}"</p> })
            }}
            <div class="update-controls">
                <button
                    class="btn btn-secondary"
                    id="check-updates-btn"
                    on:click=on_check
                    disabled=move || checking.get() || updating.get()
                >
                    {move || if checking.get() { "Checking\u{2026}" } else { "Check now" }}
                </button>
                <label class="toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || auto_update.get()
                        on:change=on_toggle
                    />
                    " Automatic update checks"
                </label>
            </div>
            <div class="update-schedule">
                <span>
                    "Last checked: "
                    {move || last_check.get().unwrap_or_else(|| "never".to_string())}
                </span>
                <span>
                    "Next check: "
                    {move || next_check.get().unwrap_or_else(|| "\u{2014}".to_string())}
                </span>
            </div>
        </section>
    }
}
