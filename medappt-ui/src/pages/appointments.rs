//! Appointments Page
//!
//! Filterable appointment list, status actions and the desktop booking form.

use leptos::*;
use medappt::catalog::AVAILABLE_TIMES;
use medappt::forms::{AppointmentForm, ValidationErrors};
use medappt::model::{Appointment, AppointmentStatus, Doctor, Patient};
use medappt::search::filter_appointments;

use crate::api;
use crate::components::{field_error, ConfirmDialog, ListSkeleton, SelectField, StatusBadge, TextField};
use crate::pages::doctors::specialty_options;
use crate::state::use_global;

#[component]
pub fn Appointments() -> impl IntoView {
    let state = use_global();
    let appointments = create_rw_signal(Vec::<Appointment>::new());
    let loading = create_rw_signal(true);
    let term = create_rw_signal(String::new());
    let status = create_rw_signal(String::new());
    let creating = create_rw_signal(false);
    let deleting = create_rw_signal(None::<Appointment>);

    let load_state = state.clone();
    create_effect(move |_| {
        let state = load_state.clone();
        spawn_local(async move {
            match api::fetch_appointments().await {
                Ok(list) => appointments.set(list),
                Err(e) => {
                    appointments.set(Vec::new());
                    state.show_error(&format!("Erro ao carregar consultas: {}", e));
                }
            }
            loading.set(false);
        });
    });

    let replace = move |updated: Appointment| {
        appointments.update(|list| {
            if let Some(slot) = list.iter_mut().find(|a| a.id == updated.id) {
                *slot = updated;
            }
        });
    };

    let change_status = {
        let state = state.clone();
        move |id: String, next: AppointmentStatus| {
            let state = state.clone();
            spawn_local(async move {
                match api::set_status(&id, next).await {
                    Ok(updated) => {
                        replace(updated);
                        state.show_success(&format!("Consulta {}", next.label().to_lowercase()));
                    }
                    Err(e) => state.show_error(&e),
                }
            });
        }
    };

    let confirm_delete = move || {
        let Some(appointment) = deleting.get() else { return };
        deleting.set(None);
        let state = state.clone();
        spawn_local(async move {
            match api::delete_appointment(&appointment.id).await {
                Ok(()) => {
                    appointments.update(|list| list.retain(|a| a.id != appointment.id));
                    state.show_success("Consulta excluída");
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Consultas"</h1>
                    <p class="text-gray-500 mt-1">"Agenda de atendimentos"</p>
                </div>
                <button
                    on:click=move |_| creating.set(true)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium"
                >
                    "+ Nova consulta"
                </button>
            </div>

            <div class="flex space-x-4">
                <input
                    type="search"
                    placeholder="Buscar por paciente, médico ou especialidade"
                    prop:value=move || term.get()
                    on:input=move |ev| term.set(event_target_value(&ev))
                    class="flex-1 bg-white rounded-lg px-4 py-2 border border-gray-300"
                />
                <select
                    on:change=move |ev| status.set(event_target_value(&ev))
                    prop:value=move || status.get()
                    class="bg-white rounded-lg px-4 py-2 border border-gray-300"
                >
                    <option value="">"Todos os status"</option>
                    {AppointmentStatus::ALL.iter().map(|s| view! {
                        <option value=s.as_str()>{s.label()}</option>
                    }).collect_view()}
                </select>
            </div>

            <div class="bg-white rounded-xl shadow-sm overflow-hidden">
                {move || {
                    if loading.get() {
                        return view! { <div class="p-4"><ListSkeleton count=6 /></div> }.into_view();
                    }
                    let wanted = status.get().parse::<AppointmentStatus>().ok();
                    let list: Vec<Appointment> = appointments.with(|all| {
                        filter_appointments(all, &term.get(), wanted).into_iter().cloned().collect()
                    });
                    if list.is_empty() {
                        return view! {
                            <p class="text-center text-gray-500 py-12">"Nenhuma consulta encontrada"</p>
                        }.into_view();
                    }
                    view! {
                        <table class="w-full text-sm">
                            <thead class="bg-gray-50 text-left text-gray-500">
                                <tr>
                                    <th class="px-4 py-2">"Data"</th>
                                    <th class="px-4 py-2">"Paciente"</th>
                                    <th class="px-4 py-2">"Médico"</th>
                                    <th class="px-4 py-2">"Status"</th>
                                    <th class="px-4 py-2"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {list.into_iter().map(|a| {
                                    let actions = [
                                        (AppointmentStatus::Confirmed, "Confirmar"),
                                        (AppointmentStatus::Completed, "Concluir"),
                                        (AppointmentStatus::Cancelled, "Cancelar"),
                                    ]
                                    .into_iter()
                                    .filter(|(next, _)| a.status.can_transition_to(*next))
                                    .map(|(next, label)| {
                                        let change_status = change_status.clone();
                                        let id = a.id.clone();
                                        view! {
                                            <button
                                                on:click=move |_| change_status(id.clone(), next)
                                                class="text-primary-700 hover:underline"
                                            >
                                                {label}
                                            </button>
                                        }
                                    })
                                    .collect_view();
                                    let for_delete = a.clone();
                                    view! {
                                        <tr class="border-t border-gray-100">
                                            <td class="px-4 py-2">
                                                {format!("{} {}", a.date.format("%d/%m/%Y"), a.time)}
                                            </td>
                                            <td class="px-4 py-2">{a.patient_name.clone()}</td>
                                            <td class="px-4 py-2">
                                                {a.doctor_name.clone()}
                                                <div class="text-gray-500">{a.doctor_specialty.clone()}</div>
                                            </td>
                                            <td class="px-4 py-2"><StatusBadge status=a.status /></td>
                                            <td class="px-4 py-2 text-right space-x-2">
                                                {actions}
                                                <button
                                                    on:click=move |_| deleting.set(Some(for_delete.clone()))
                                                    class="text-red-600 hover:underline"
                                                >
                                                    "Excluir"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view()
                }}
            </div>

            <Show when=move || creating.get()>
                <NewAppointmentDialog
                    on_saved=move |saved: Appointment| {
                        appointments.update(|list| list.push(saved));
                        creating.set(false);
                    }
                    on_close=move || creating.set(false)
                />
            </Show>

            {move || deleting.get().map(|appointment| {
                let confirm_delete = confirm_delete.clone();
                view! {
                    <ConfirmDialog
                        title="Excluir consulta"
                        message=format!(
                            "Excluir a consulta de {} em {}?",
                            appointment.patient_name,
                            appointment.date.format("%d/%m/%Y"),
                        )
                        on_confirm=move || confirm_delete()
                        on_cancel=move || deleting.set(None)
                    />
                }
            })}
        </div>
    }
}

#[component]
fn NewAppointmentDialog(
    on_saved: impl Fn(Appointment) + Clone + 'static,
    on_close: impl Fn() + Clone + 'static,
) -> impl IntoView {
    let state = use_global();
    let form = create_rw_signal(AppointmentForm::default());
    let errors = create_rw_signal(ValidationErrors::new());
    let doctors = create_rw_signal(Vec::<Doctor>::new());
    let patients = create_rw_signal(Vec::<Patient>::new());
    let submitting = create_rw_signal(false);

    let load_state = state.clone();
    create_effect(move |_| {
        let state = load_state.clone();
        spawn_local(async move {
            match api::fetch_patients().await {
                Ok(list) => patients.set(list),
                Err(e) => state.show_error(&format!("Erro ao carregar pacientes: {}", e)),
            }
        });
    });

    // Doctor choices follow the chosen specialty
    let doctors_state = state.clone();
    create_effect(move |_| {
        let specialty = form.with(|f| f.specialty.clone());
        doctors.set(Vec::new());
        if specialty.is_empty() {
            return;
        }
        let state = doctors_state.clone();
        spawn_local(async move {
            match api::fetch_doctors_by_specialty(&specialty).await {
                Ok(list) => doctors.set(list),
                Err(e) => state.show_error(&format!("Erro ao carregar médicos: {}", e)),
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let current = form.get();
        let today = chrono::Local::now().date_naive();
        if let Err(e) = current.validate(today) {
            errors.set(e);
            return;
        }
        errors.set(ValidationErrors::new());
        submitting.set(true);

        let state = state.clone();
        let on_saved = on_saved.clone();
        spawn_local(async move {
            match api::create_appointment(&current).await {
                Ok(saved) => {
                    state.show_success("Consulta agendada");
                    on_saved(saved);
                }
                Err(e) => state.show_error(&e),
            }
            submitting.set(false);
        });
    };

    let close = on_close.clone();

    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
            <div class="bg-white rounded-xl p-6 w-full max-w-md mx-4">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-xl font-semibold">"Nova consulta"</h2>
                    <button on:click=move |_| close() class="text-gray-400 hover:text-gray-700">"✕"</button>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <SelectField
                        label="Especialidade"
                        options=Signal::derive(specialty_options)
                        value=Signal::derive(move || form.with(|f| f.specialty.clone()))
                        on_change=move |v: String| form.update(|f| {
                            f.specialty = v;
                            f.doctor_id.clear();
                        })
                        error=field_error(errors, "specialty")
                    />
                    <SelectField
                        label="Médico"
                        options=Signal::derive(move || doctors.with(|list| {
                            list.iter().map(|d| (d.id.clone(), d.name.clone())).collect()
                        }))
                        value=Signal::derive(move || form.with(|f| f.doctor_id.clone()))
                        on_change=move |v: String| form.update(|f| f.doctor_id = v)
                        error=field_error(errors, "doctorId")
                    />
                    <SelectField
                        label="Paciente"
                        options=Signal::derive(move || patients.with(|list| {
                            list.iter().map(|p| (p.id.clone(), p.name.clone())).collect()
                        }))
                        value=Signal::derive(move || form.with(|f| f.patient_id.clone()))
                        on_change=move |v: String| form.update(|f| f.patient_id = v)
                        error=field_error(errors, "patientId")
                    />
                    <div class="grid grid-cols-2 gap-3">
                        <TextField
                            label="Data"
                            input_type="date"
                            value=Signal::derive(move || form.with(|f| f.date.clone()))
                            on_input=move |v: String| form.update(|f| f.date = v)
                            error=field_error(errors, "date")
                        />
                        <SelectField
                            label="Horário"
                            options=Signal::derive(|| {
                                AVAILABLE_TIMES.iter().map(|t| (t.to_string(), t.to_string())).collect()
                            })
                            value=Signal::derive(move || form.with(|f| f.time.clone()))
                            on_change=move |v: String| form.update(|f| f.time = v)
                            error=field_error(errors, "time")
                        />
                    </div>
                    <TextField
                        label="Motivo"
                        value=Signal::derive(move || form.with(|f| f.reason.clone().unwrap_or_default()))
                        on_input=move |v: String| form.update(|f| f.reason = Some(v))
                        error=field_error(errors, "reason")
                    />

                    <div class="flex space-x-3 pt-4">
                        <button
                            type="button"
                            on:click=move |_| on_close()
                            class="flex-1 px-4 py-2 bg-gray-100 hover:bg-gray-200 rounded-lg font-medium"
                        >
                            "Cancelar"
                        </button>
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="flex-1 px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-400 text-white rounded-lg font-medium"
                        >
                            {move || if submitting.get() { "Agendando..." } else { "Agendar" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
