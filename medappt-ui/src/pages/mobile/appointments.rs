use leptos::*;
use medappt::catalog::specialty_name;
use medappt::model::{Appointment, AppointmentStatus};

use super::{load_own_appointments, upcoming};
use crate::api;
use crate::components::{ConfirmDialog, ListSkeleton, StatusBadge};
use crate::state::use_global;

#[component]
pub fn MobileAppointments() -> impl IntoView {
    let state = use_global();
    let appointments = create_rw_signal(Vec::<Appointment>::new());
    let loading = create_rw_signal(true);
    let show_past = create_rw_signal(false);
    let cancelling = create_rw_signal(None::<Appointment>);

    let load_state = state.clone();
    create_effect(move |_| {
        let user_id = load_state.user_id.get();
        let state = load_state.clone();
        spawn_local(async move {
            match load_own_appointments(&user_id).await {
                Ok((_, list)) => appointments.set(list),
                Err(e) => {
                    appointments.set(Vec::new());
                    state.show_error(&format!("Erro ao carregar consultas: {}", e));
                }
            }
            loading.set(false);
        });
    });

    let visible = move || {
        let today = chrono::Local::now().date_naive();
        let all = appointments.get();
        if show_past.get() {
            let open = upcoming(all.clone(), today);
            let mut past: Vec<Appointment> = all
                .into_iter()
                .filter(|a| !open.iter().any(|o| o.id == a.id))
                .collect();
            past.sort_by(|a, b| (b.date, &b.time).cmp(&(a.date, &a.time)));
            past
        } else {
            upcoming(all, today)
        }
    };

    let confirm_cancel = move || {
        let Some(appointment) = cancelling.get() else { return };
        cancelling.set(None);
        let state = state.clone();
        spawn_local(async move {
            match api::cancel_appointment(&appointment.id).await {
                Ok(updated) => {
                    appointments.update(|list| {
                        if let Some(slot) = list.iter_mut().find(|a| a.id == updated.id) {
                            *slot = updated;
                        }
                    });
                    state.show_success("Consulta cancelada");
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    let tab_class = move |past: bool| {
        move || {
            if show_past.get() == past {
                "flex-1 py-2 rounded-lg bg-white shadow-sm font-medium"
            } else {
                "flex-1 py-2 rounded-lg text-gray-500"
            }
        }
    };

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">"Minhas consultas"</h1>

            <div class="flex bg-gray-100 rounded-lg p-1 text-sm">
                <button class=tab_class(false) on:click=move |_| show_past.set(false)>"Próximas"</button>
                <button class=tab_class(true) on:click=move |_| show_past.set(true)>"Histórico"</button>
            </div>

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton count=3 /> }.into_view();
                }
                let list = visible();
                if list.is_empty() {
                    return view! {
                        <p class="text-center text-gray-500 py-8">"Nenhuma consulta"</p>
                    }.into_view();
                }
                list.into_iter().map(|a| {
                    let cancellable = a.status.can_transition_to(AppointmentStatus::Cancelled);
                    let for_cancel = a.clone();
                    view! {
                        <div class="bg-white rounded-xl p-4 shadow-sm">
                            <div class="flex items-center justify-between">
                                <p class="font-semibold">{a.doctor_name.clone()}</p>
                                <StatusBadge status=a.status />
                            </div>
                            <p class="text-sm text-gray-500">{specialty_name(&a.doctor_specialty).to_string()}</p>
                            <p class="text-sm mt-2">
                                {format!("{} às {}", a.date.format("%d/%m/%Y"), a.time)}
                            </p>
                            {cancellable.then(|| view! {
                                <button
                                    on:click=move |_| cancelling.set(Some(for_cancel.clone()))
                                    class="mt-3 text-sm text-red-600"
                                >
                                    "Cancelar consulta"
                                </button>
                            })}
                        </div>
                    }
                }).collect_view()
            }}

            {move || cancelling.get().map(|appointment| {
                let confirm_cancel = confirm_cancel.clone();
                view! {
                    <ConfirmDialog
                        title="Cancelar consulta"
                        message=format!(
                            "Cancelar a consulta com {} em {}?",
                            appointment.doctor_name,
                            appointment.date.format("%d/%m/%Y"),
                        )
                        confirm_label="Cancelar consulta"
                        on_confirm=move || confirm_cancel()
                        on_cancel=move || cancelling.set(None)
                    />
                }
            })}
        </div>
    }
}
