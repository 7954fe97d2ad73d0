use leptos::*;

use crate::pages::profile::ProfileEditor;

#[component]
pub fn MobileProfile() -> impl IntoView {
    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">"Meu perfil"</h1>
            <div class="bg-white rounded-xl p-4 shadow-sm">
                <ProfileEditor />
            </div>
        </div>
    }
}
