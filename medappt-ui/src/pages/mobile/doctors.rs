use leptos::*;
use medappt::catalog::specialty_name;
use medappt::model::Doctor;
use medappt::search::search;

use crate::api;
use crate::components::ListSkeleton;
use crate::state::use_global;

#[component]
pub fn MobileDoctors() -> impl IntoView {
    let state = use_global();
    let doctors = create_rw_signal(Vec::<Doctor>::new());
    let loading = create_rw_signal(true);
    let term = create_rw_signal(String::new());

    create_effect(move |_| {
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_doctors().await {
                Ok(list) => doctors.set(list),
                Err(e) => {
                    doctors.set(Vec::new());
                    state.show_error(&format!("Erro ao carregar médicos: {}", e));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">"Médicos"</h1>
            <input
                type="search"
                placeholder="Buscar médico ou especialidade"
                prop:value=move || term.get()
                on:input=move |ev| term.set(event_target_value(&ev))
                class="w-full bg-white rounded-lg px-4 py-2 border border-gray-300"
            />

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton count=4 /> }.into_view();
                }
                let list: Vec<Doctor> =
                    doctors.with(|all| search(all, &term.get()).into_iter().cloned().collect());
                if list.is_empty() {
                    return view! {
                        <p class="text-center text-gray-500 py-8">"Nenhum médico encontrado"</p>
                    }.into_view();
                }
                list.into_iter().map(|d| view! {
                    <div class="bg-white rounded-xl p-4 shadow-sm flex items-center space-x-3">
                        <div class="w-10 h-10 rounded-full bg-primary-100 text-primary-700 flex items-center justify-center font-semibold">
                            {d.initials()}
                        </div>
                        <div>
                            <p class="font-semibold">{d.name.clone()}</p>
                            <p class="text-sm text-gray-500">{specialty_name(&d.specialty).to_string()}</p>
                        </div>
                    </div>
                }).collect_view()
            }}
        </div>
    }
}
