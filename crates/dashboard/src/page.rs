//! Browser page glue: visibility tracking, the refresh hotkey, dialogs,
//! reload, and the persisted auto-update preference.
//!
//! Event listeners are wrapped in guard structs that detach on drop, the
//! same pattern as a long-lived `Closure` owner around an `EventSource`.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent};

/// `localStorage` key for the auto-update-check preference.
const AUTO_UPDATE_KEY: &str = "devicebox-auto-update";

/// Guard keeping the `visibilitychange` listener alive; detaches on drop.
pub struct VisibilityWatch {
    document: Option<Document>,
    on_change: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl Drop for VisibilityWatch {
    fn drop(&mut self) {
        if let (Some(document), Some(on_change)) = (&self.document, &self.on_change) {
            let _ = document.remove_event_listener_with_callback(
                "visibilitychange",
                on_change.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Track whether the page is visible.
///
/// Returns a signal that follows `document.hidden` plus the listener guard.
/// Drop the guard to stop tracking. If there is no document (tests, worker
/// contexts), the signal stays `true` and the guard is inert.
pub fn use_page_visibility() -> (ReadSignal<bool>, VisibilityWatch) {
    let (visible, set_visible) = signal(true);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        leptos::logging::warn!("no document available; visibility tracking disabled");
        return (
            visible,
            VisibilityWatch {
                document: None,
                on_change: None,
            },
        );
    };

    set_visible.set(!document.hidden());

    let observed = document.clone();
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        set_visible.set(!observed.hidden());
    });

    if document
        .add_event_listener_with_callback("visibilitychange", on_change.as_ref().unchecked_ref())
        .is_err()
    {
        leptos::logging::warn!("failed to attach visibilitychange listener");
    }

    (
        visible,
        VisibilityWatch {
            document: Some(document),
            on_change: Some(on_change),
        },
    )
}

/// Guard keeping the Ctrl+R hotkey listener alive; detaches on drop.
pub struct HotkeyWatch {
    document: Option<Document>,
    on_keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl Drop for HotkeyWatch {
    fn drop(&mut self) {
        if let (Some(document), Some(on_keydown)) = (&self.document, &self.on_keydown) {
            let _ = document.remove_event_listener_with_callback(
                "keydown",
                on_keydown.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Bind Ctrl+R to `action` instead of the browser reload.
pub fn use_refresh_hotkey(action: impl Fn() + 'static) -> HotkeyWatch {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return HotkeyWatch {
            document: None,
            on_keydown: None,
        };
    };

    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if event.ctrl_key() && event.key() == "r" {
            event.prevent_default();
            action();
        }
    });

    if document
        .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
        .is_err()
    {
        leptos::logging::warn!("failed to attach keydown listener");
    }

    HotkeyWatch {
        document: Some(document),
        on_keydown: Some(on_keydown),
    }
}

/// Blocking confirmation prompt; `false` when dialogs are unavailable.
#[must_use]
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Reload the page, e.g. after the backend restarted into a new version.
pub fn reload() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

/// Current wall-clock time as a locale time string, for the
/// "last checked" display.
#[must_use]
pub fn local_time_string() -> String {
    web_sys::js_sys::Date::new_0()
        .to_locale_time_string("en-GB")
        .into()
}

/// Read the persisted auto-update preference; defaults to enabled.
#[must_use]
pub fn stored_auto_update() -> bool {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(AUTO_UPDATE_KEY).ok().flatten())
        .is_none_or(|value| value != "off")
}

/// Persist the auto-update preference.
pub fn store_auto_update(enabled: bool) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(AUTO_UPDATE_KEY, if enabled { "on" } else { "off" });
    }
}
