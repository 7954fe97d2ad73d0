//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use medappt::routing::DeviceClass;

/// Profile used until sign-in is wired to the hosted auth service
pub const DEFAULT_USER_ID: &str = "usr-admin";

const USER_KEY: &str = "medappt_user";

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Viewport width in CSS pixels
    pub viewport_width: RwSignal<u32>,
    /// Profile id of the current user
    pub user_id: RwSignal<String>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Current viewport width, desktop-sized when unknown
pub fn viewport_width() -> u32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w as u32)
        .unwrap_or(1024)
}

fn stored_user_id() -> String {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(USER_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        viewport_width: create_rw_signal(viewport_width()),
        user_id: create_rw_signal(stored_user_id()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    pub fn device(&self) -> DeviceClass {
        DeviceClass::from_width(self.viewport_width.get())
    }

    pub fn set_user(&self, user_id: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(USER_KEY, user_id);
        }
        self.user_id.set(user_id.to_string());
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

/// Shorthand for the context lookup every page does
pub fn use_global() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}
