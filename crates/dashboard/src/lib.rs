//! Browser dashboard for a DeviceBox appliance.
//!
//! Client-side rendered Leptos application polling the appliance HTTP API
//! for system telemetry, update availability, and peripheral state, and
//! issuing the update, reboot, and device-management commands.

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

pub mod api;
mod components;
pub mod controller;
pub mod guard;
mod page;
mod pages;
pub mod polling;
pub mod refresh;

use components::ToastContainer;
use pages::{Home, NotFound};

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <ToastContainer>
            <Router>
                <main>
                    <Routes fallback=|| view! { <NotFound/> }>
                        <Route path=path!("/") view=Home/>
                    </Routes>
                </main>
            </Router>
        </ToastContainer>
    }
}
