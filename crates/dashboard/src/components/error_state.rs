//! Panel-level error placeholder.
//!
//! A failed fetch replaces the whole panel body with this component; stale
//! data is discarded rather than shown next to the error.

use leptos::prelude::*;

/// Error placeholder carrying the backend or transport error message.
#[component]
pub fn ErrorState(
    /// The error message, surfaced verbatim.
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <div class="error-state">
            <span class="error-icon">"\u{26a0}"</span>
            <span>{"Failed to load: "}{message}</span>
        </div>
    }
}
