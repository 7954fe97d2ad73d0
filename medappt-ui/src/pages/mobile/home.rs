use leptos::*;
use leptos_router::*;
use medappt::catalog::specialty_name;
use medappt::model::{Appointment, Profile};

use super::{load_own_appointments, upcoming};
use crate::components::{ListSkeleton, StatusBadge};
use crate::state::use_global;

#[component]
pub fn MobileHome() -> impl IntoView {
    let state = use_global();
    let profile = create_rw_signal(None::<Profile>);
    let next = create_rw_signal(Vec::<Appointment>::new());
    let loading = create_rw_signal(true);

    create_effect(move |_| {
        let user_id = state.user_id.get();
        let state = state.clone();
        spawn_local(async move {
            match load_own_appointments(&user_id).await {
                Ok((p, list)) => {
                    profile.set(Some(p));
                    next.set(upcoming(list, chrono::Local::now().date_naive()));
                }
                Err(e) => {
                    next.set(Vec::new());
                    state.show_error(&format!("Erro ao carregar consultas: {}", e));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <div class="space-y-6">
            <div>
                <p class="text-gray-500">"Olá,"</p>
                <h1 class="text-2xl font-bold">
                    {move || profile.with(|p| p.as_ref().map(|p| p.name.clone()).unwrap_or_default())}
                </h1>
            </div>

            <A
                href="/mobile/appointments/new"
                class="block text-center px-4 py-3 bg-primary-600 text-white rounded-xl font-semibold"
            >
                "+ Agendar consulta"
            </A>

            <section>
                <h2 class="text-lg font-semibold mb-3">"Próximas consultas"</h2>
                {move || {
                    if loading.get() {
                        return view! { <ListSkeleton count=2 /> }.into_view();
                    }
                    let list = next.get();
                    if list.is_empty() {
                        return view! {
                            <p class="text-gray-500 text-sm">"Nenhuma consulta agendada"</p>
                        }.into_view();
                    }
                    list.into_iter().take(3).map(|a| view! {
                        <div class="bg-white rounded-xl p-4 shadow-sm mb-3">
                            <div class="flex items-center justify-between">
                                <p class="font-semibold">{a.doctor_name.clone()}</p>
                                <StatusBadge status=a.status />
                            </div>
                            <p class="text-sm text-gray-500">{specialty_name(&a.doctor_specialty).to_string()}</p>
                            <p class="text-sm mt-2">
                                {format!("{} às {}", a.date.format("%d/%m/%Y"), a.time)}
                            </p>
                        </div>
                    }).collect_view()
                }}
            </section>
        </div>
    }
}
