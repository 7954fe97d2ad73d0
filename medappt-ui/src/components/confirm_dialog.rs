//! Confirmation Dialog
//!
//! Every delete goes through this before anything is sent.

use leptos::*;

#[component]
pub fn ConfirmDialog(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(default = "Excluir")] confirm_label: &'static str,
    on_confirm: impl Fn() + 'static,
    on_cancel: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
            <div class="bg-white rounded-xl p-6 w-full max-w-sm mx-4 shadow-xl">
                <h2 class="text-lg font-semibold mb-2">{title}</h2>
                <p class="text-gray-600 mb-6">{message}</p>
                <div class="flex space-x-3">
                    <button
                        type="button"
                        on:click=move |_| on_cancel()
                        class="flex-1 px-4 py-2 bg-gray-100 hover:bg-gray-200 rounded-lg font-medium"
                    >
                        "Cancelar"
                    </button>
                    <button
                        type="button"
                        on:click=move |_| on_confirm()
                        class="flex-1 px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-lg font-medium"
                    >
                        {confirm_label}
                    </button>
                </div>
            </div>
        </div>
    }
}
