//! Navigation Components
//!
//! Top bar for the admin screens, bottom tab bar for the mobile ones.

use leptos::*;
use leptos_router::*;

/// Admin navigation header
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="bg-white border-b border-gray-200">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/dashboard" class="flex items-center space-x-3">
                        <span class="text-2xl">"🩺"</span>
                        <span class="text-xl font-bold text-primary-700">"MedAppt"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/dashboard" label="Dashboard" />
                        <NavLink href="/appointments" label="Consultas" />
                        <NavLink href="/doctors" label="Médicos" />
                        <NavLink href="/patients" label="Pacientes" />
                        <NavLink href="/profile" label="Perfil" />
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-600 hover:text-primary-700 hover:bg-primary-50 transition-colors"
            active_class="bg-primary-50 text-primary-700"
        >
            {label}
        </A>
    }
}

/// Mobile bottom tab bar
#[component]
pub fn MobileNav() -> impl IntoView {
    view! {
        <nav class="fixed bottom-0 left-0 right-0 bg-white border-t border-gray-200 z-40">
            <div class="grid grid-cols-4 h-16">
                <Tab href="/mobile" icon="🏠" label="Início" />
                <Tab href="/mobile/appointments" icon="📅" label="Consultas" />
                <Tab href="/mobile/doctors" icon="👩‍⚕️" label="Médicos" />
                <Tab href="/mobile/profile" icon="👤" label="Perfil" />
            </div>
        </nav>
    }
}

#[component]
fn Tab(href: &'static str, icon: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="flex flex-col items-center justify-center text-xs text-gray-500"
            active_class="text-primary-600"
        >
            <span class="text-xl">{icon}</span>
            <span>{label}</span>
        </A>
    }
}
