//! App Root Component
//!
//! Routing, global providers and the mobile/desktop redirect.

use leptos::*;
use leptos_router::*;
use medappt::routing::{redirect_for, DeviceClass};

use crate::components::{MobileNav, Nav, Toast};
use crate::pages::mobile::{MobileAppointments, MobileDoctors, MobileHome, MobileProfile, NewAppointment};
use crate::pages::{Appointments, Dashboard, Doctors, Landing, Patients, Profile};
use crate::state::global::viewport_width;
use crate::state::{provide_global_state, use_global};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <DeviceRedirect />
            <div class="min-h-screen bg-gray-50 text-gray-900">
                <Routes>
                    <Route path="/" view=Landing />

                    // Admin screens
                    <Route path="/dashboard" view=|| view! { <AdminLayout><Dashboard /></AdminLayout> } />
                    <Route path="/appointments" view=|| view! { <AdminLayout><Appointments /></AdminLayout> } />
                    <Route path="/doctors" view=|| view! { <AdminLayout><Doctors /></AdminLayout> } />
                    <Route path="/patients" view=|| view! { <AdminLayout><Patients /></AdminLayout> } />
                    <Route path="/profile" view=|| view! { <AdminLayout><Profile /></AdminLayout> } />

                    // Mobile screens
                    <Route path="/mobile" view=MobileLayout>
                        <Route path="" view=MobileHome />
                        <Route path="appointments" view=MobileAppointments />
                        <Route path="appointments/new" view=NewAppointment />
                        <Route path="doctors" view=MobileDoctors />
                        <Route path="profile" view=MobileProfile />
                    </Route>

                    <Route path="/*any" view=NotFound />
                </Routes>

                <Toast />
            </div>
        </Router>
    }
}

/// Sends phones to `/mobile` and larger screens to the admin tree,
/// re-evaluated on every navigation and resize
#[component]
fn DeviceRedirect() -> impl IntoView {
    let state = use_global();
    let location = use_location();
    let navigate = use_navigate();

    let width = state.viewport_width;
    let _ = window_event_listener(ev::resize, move |_| width.set(viewport_width()));

    create_effect(move |_| {
        let path = location.pathname.get();
        let device = DeviceClass::from_width(width.get());
        if let Some(target) = redirect_for(&path, device) {
            navigate(
                target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}

#[component]
fn AdminLayout(children: Children) -> impl IntoView {
    view! {
        <Nav />
        <main class="container mx-auto px-4 py-8">{children()}</main>
    }
}

#[component]
fn MobileLayout() -> impl IntoView {
    view! {
        <main class="px-4 pt-4 pb-24 max-w-md mx-auto">
            <Outlet />
        </main>
        <MobileNav />
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    let state = use_global();
    let home = move || {
        if state.device() == DeviceClass::Mobile {
            "/mobile".to_string()
        } else {
            "/dashboard".to_string()
        }
    };

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Página não encontrada"</h1>
            <p class="text-gray-500 mb-6">"O endereço acessado não existe."</p>
            <A
                href=home
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors"
            >
                "Voltar ao início"
            </A>
        </div>
    }
}
