//! Toast notification system for transient command feedback.

use leptos::prelude::*;
use leptos::task::spawn_local;

/// Display window of a toast before it auto-dismisses.
const TOAST_TTL_MS: u32 = 5_000;

/// Severity of a toast, mapped to its CSS class and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn css_class(self) -> &'static str {
        match self {
            Self::Info => "toast-info",
            Self::Success => "toast-success",
            Self::Warning => "toast-warning",
            Self::Error => "toast-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Info => "\u{2139}",
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Error => "\u{2716}",
        }
    }
}

/// A single toast message.
#[derive(Debug, Clone)]
pub struct ToastMessage {
    /// Unique id for keyed rendering and dismissal.
    pub id: u32,
    pub severity: Severity,
    /// The message body to display.
    pub text: String,
}

/// Reactive context providing toast mutation methods.
#[derive(Clone)]
pub struct ToastProvider {
    set_toasts: WriteSignal<Vec<ToastMessage>>,
    next_id: ReadSignal<u32>,
    set_next_id: WriteSignal<u32>,
}

impl ToastProvider {
    /// Push a new toast. It auto-dismisses after 5 seconds.
    pub fn push(&self, severity: Severity, text: impl Into<String>) {
        let id = self.next_id.get_untracked();
        self.set_next_id.set(id + 1);

        self.set_toasts.update(|list| {
            list.push(ToastMessage {
                id,
                severity,
                text: text.into(),
            });
        });

        let set_toasts = self.set_toasts;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_TTL_MS).await;
            set_toasts.update(|list| {
                list.retain(|t| t.id != id);
            });
        });
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(Severity::Info, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(Severity::Success, text);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.push(Severity::Warning, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(Severity::Error, text);
    }

    /// Dismiss a toast immediately by id.
    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|list| {
            list.retain(|t| t.id != id);
        });
    }
}

/// Access the toast provider from Leptos context.
///
/// Must be called within a component tree that has a [`ToastContainer`] ancestor.
pub fn use_toasts() -> ToastProvider {
    use_context::<ToastProvider>().expect("ToastProvider not found in context")
}

/// Container component that provides toast context and renders active toasts.
///
/// Place this once near the root of the component tree (e.g. inside `<App/>`).
#[component]
pub fn ToastContainer(children: Children) -> impl IntoView {
    let (toasts, set_toasts) = signal(Vec::<ToastMessage>::new());
    let (next_id, set_next_id) = signal(0_u32);

    let provider = ToastProvider {
        set_toasts,
        next_id,
        set_next_id,
    };

    provide_context(provider.clone());

    view! {
        {children()}
        <div class="toast-container">
            {move || {
                toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        let p = provider.clone();
                        view! {
                            <div class=format!("toast {}", toast.severity.css_class())>
                                <span class="toast-icon">{toast.severity.icon()}</span>
                                <span class="toast-message">{toast.text}</span>
                                <button class="toast-dismiss" on:click=move |_| p.dismiss(id)>
                                    "\u{00D7}"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
