//! Form Fields
//!
//! Labelled inputs that show the validation message for their field.

use leptos::*;
use medappt::forms::ValidationErrors;

const INPUT_CLASS: &str = "w-full bg-white rounded-lg px-4 py-2 border border-gray-300 \
                           focus:border-primary-500 focus:outline-none";

/// The message for `name`, tracking the form's error map
pub fn field_error(errors: RwSignal<ValidationErrors>, name: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.get(name).map(str::to_string)))
}

#[component]
pub fn TextField(
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-1">{label}</label>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
                class=INPUT_CLASS
            />
            {move || error.get().map(|msg| view! {
                <p class="text-red-600 text-xs mt-1">{msg}</p>
            })}
        </div>
    }
}

/// `options` are `(value, label)` pairs; an empty value acts as placeholder
#[component]
pub fn SelectField(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-1">{label}</label>
            <select
                on:change=move |ev| on_change.call(event_target_value(&ev))
                prop:value=move || value.get()
                class=INPUT_CLASS
            >
                <option value="">"Selecione..."</option>
                {move || options.get().into_iter().map(|(value, label)| view! {
                    <option value=value>{label}</option>
                }).collect_view()}
            </select>
            {move || error.get().map(|msg| view! {
                <p class="text-red-600 text-xs mt-1">{msg}</p>
            })}
        </div>
    }
}
