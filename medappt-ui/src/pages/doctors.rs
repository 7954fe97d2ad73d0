//! Doctors Page
//!
//! Searchable doctor list with create, edit and delete.

use leptos::*;
use medappt::catalog::{specialty_name, SPECIALTIES};
use medappt::forms::{DoctorForm, ValidationErrors};
use medappt::model::Doctor;
use medappt::search::{doctors_by_specialty, search};

use crate::api;
use crate::components::{field_error, ConfirmDialog, ListSkeleton, SelectField, TextField};
use crate::state::use_global;

/// `(id, name)` pairs for a specialty dropdown
pub fn specialty_options() -> Vec<(String, String)> {
    SPECIALTIES
        .iter()
        .map(|s| (s.id.to_string(), s.name.to_string()))
        .collect()
}

#[derive(Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(Doctor),
}

#[component]
pub fn Doctors() -> impl IntoView {
    let state = use_global();
    let doctors = create_rw_signal(Vec::<Doctor>::new());
    let loading = create_rw_signal(true);
    let term = create_rw_signal(String::new());
    let specialty = create_rw_signal(String::new());
    let editing = create_rw_signal(Editing::Closed);
    let deleting = create_rw_signal(None::<Doctor>);

    let load_state = state.clone();
    create_effect(move |_| {
        let state = load_state.clone();
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

    let visible = move || {
        doctors.with(|all| {
            let by_specialty: Vec<Doctor> = match specialty.get().as_str() {
                "" => all.clone(),
                s => doctors_by_specialty(all, s).into_iter().cloned().collect(),
            };
            search(&by_specialty, &term.get())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let confirm_delete = move || {
        let Some(doctor) = deleting.get() else { return };
        deleting.set(None);
        let state = state.clone();
        spawn_local(async move {
            match api::delete_doctor(&doctor.id).await {
                Ok(()) => {
                    doctors.update(|list| list.retain(|d| d.id != doctor.id));
                    state.show_success("Médico excluído");
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Médicos"</h1>
                    <p class="text-gray-500 mt-1">"Corpo clínico cadastrado"</p>
                </div>
                <button
                    on:click=move |_| editing.set(Editing::New)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium"
                >
                    "+ Novo médico"
                </button>
            </div>

            <div class="flex space-x-4">
                <input
                    type="search"
                    placeholder="Buscar por nome, especialidade ou email"
                    prop:value=move || term.get()
                    on:input=move |ev| term.set(event_target_value(&ev))
                    class="flex-1 bg-white rounded-lg px-4 py-2 border border-gray-300"
                />
                <select
                    on:change=move |ev| specialty.set(event_target_value(&ev))
                    prop:value=move || specialty.get()
                    class="bg-white rounded-lg px-4 py-2 border border-gray-300"
                >
                    <option value="">"Todas as especialidades"</option>
                    {specialty_options().into_iter().map(|(id, name)| view! {
                        <option value=id>{name}</option>
                    }).collect_view()}
                </select>
            </div>

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton count=4 /> }.into_view();
                }
                let list = visible();
                if list.is_empty() {
                    return view! {
                        <p class="text-center text-gray-500 py-12">"Nenhum médico encontrado"</p>
                    }.into_view();
                }
                view! {
                    <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                        {list.into_iter().map(|doctor| {
                            let for_edit = doctor.clone();
                            let for_delete = doctor.clone();
                            view! {
                                <div class="bg-white rounded-xl p-4 shadow-sm">
                                    <div class="flex items-center space-x-3">
                                        <div class="w-10 h-10 rounded-full bg-primary-100 text-primary-700 flex items-center justify-center font-semibold">
                                            {doctor.initials()}
                                        </div>
                                        <div>
                                            <h3 class="font-semibold">{doctor.name.clone()}</h3>
                                            <p class="text-sm text-gray-500">{specialty_name(&doctor.specialty).to_string()}</p>
                                        </div>
                                    </div>
                                    <p class="text-sm text-gray-600 mt-3">{doctor.email.clone()}</p>
                                    <div class="flex space-x-2 mt-4 text-sm">
                                        <button
                                            on:click=move |_| editing.set(Editing::Existing(for_edit.clone()))
                                            class="text-primary-700 hover:underline"
                                        >
                                            "Editar"
                                        </button>
                                        <button
                                            on:click=move |_| deleting.set(Some(for_delete.clone()))
                                            class="text-red-600 hover:underline"
                                        >
                                            "Excluir"
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_view()
            }}

            {move || match editing.get() {
                Editing::Closed => view! {}.into_view(),
                Editing::New => view! {
                    <DoctorDialog
                        doctor=None
                        on_saved=move |saved: Doctor| {
                            doctors.update(|list| list.push(saved));
                            editing.set(Editing::Closed);
                        }
                        on_close=move || editing.set(Editing::Closed)
                    />
                }.into_view(),
                Editing::Existing(doctor) => view! {
                    <DoctorDialog
                        doctor=Some(doctor)
                        on_saved=move |saved: Doctor| {
                            doctors.update(|list| {
                                if let Some(slot) = list.iter_mut().find(|d| d.id == saved.id) {
                                    *slot = saved;
                                }
                            });
                            editing.set(Editing::Closed);
                        }
                        on_close=move || editing.set(Editing::Closed)
                    />
                }.into_view(),
            }}

            {move || deleting.get().map(|doctor| {
                let confirm_delete = confirm_delete.clone();
                view! {
                    <ConfirmDialog
                        title="Excluir médico"
                        message=format!("Excluir {}? Esta ação não pode ser desfeita.", doctor.name)
                        on_confirm=move || confirm_delete()
                        on_cancel=move || deleting.set(None)
                    />
                }
            })}
        </div>
    }
}

fn form_from(doctor: &Doctor) -> DoctorForm {
    DoctorForm {
        name: doctor.name.clone(),
        specialty: doctor.specialty.clone(),
        email: doctor.email.clone(),
        phone: doctor.phone.clone(),
        bio: doctor.bio.clone(),
    }
}

#[component]
fn DoctorDialog(
    doctor: Option<Doctor>,
    on_saved: impl Fn(Doctor) + Clone + 'static,
    on_close: impl Fn() + Clone + 'static,
) -> impl IntoView {
    let state = use_global();
    let editing_id = doctor.as_ref().map(|d| d.id.clone());
    let title = if doctor.is_some() { "Editar médico" } else { "Novo médico" };
    let form = create_rw_signal(doctor.as_ref().map(form_from).unwrap_or_default());
    let errors = create_rw_signal(ValidationErrors::new());
    let submitting = create_rw_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let current = form.get();
        if let Err(e) = current.validate() {
            errors.set(e);
            return;
        }
        errors.set(ValidationErrors::new());
        submitting.set(true);

        let state = state.clone();
        let id = editing_id.clone();
        let on_saved = on_saved.clone();
        spawn_local(async move {
            let result = match &id {
                Some(id) => api::update_doctor(id, &current).await,
                None => api::create_doctor(&current).await,
            };
            match result {
                Ok(saved) => {
                    state.show_success("Médico salvo");
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
                    <h2 class="text-xl font-semibold">{title}</h2>
                    <button on:click=move |_| close() class="text-gray-400 hover:text-gray-700">"✕"</button>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <TextField
                        label="Nome"
                        value=Signal::derive(move || form.with(|f| f.name.clone()))
                        on_input=move |v: String| form.update(|f| f.name = v)
                        error=field_error(errors, "name")
                    />
                    <SelectField
                        label="Especialidade"
                        options=Signal::derive(specialty_options)
                        value=Signal::derive(move || form.with(|f| f.specialty.clone()))
                        on_change=move |v: String| form.update(|f| f.specialty = v)
                        error=field_error(errors, "specialty")
                    />
                    <TextField
                        label="Email"
                        input_type="email"
                        value=Signal::derive(move || form.with(|f| f.email.clone()))
                        on_input=move |v: String| form.update(|f| f.email = v)
                        error=field_error(errors, "email")
                    />
                    <TextField
                        label="Telefone"
                        value=Signal::derive(move || form.with(|f| f.phone.clone().unwrap_or_default()))
                        on_input=move |v: String| form.update(|f| f.phone = Some(v))
                        error=field_error(errors, "phone")
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
                            {move || if submitting.get() { "Salvando..." } else { "Salvar" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
