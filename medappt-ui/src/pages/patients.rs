//! Patients Page
//!
//! Patient list with search, CPF-masked create/edit dialog, delete and the
//! selected patient's medical records.

use leptos::*;
use medappt::forms::{format_cpf, MedicalRecordForm, PatientForm, ValidationErrors};
use medappt::model::{Doctor, MedicalRecord, Patient};
use medappt::search::search;

use crate::api;
use crate::components::{field_error, ConfirmDialog, ListSkeleton, SelectField, TextField};
use crate::state::use_global;

#[derive(Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(Patient),
}

#[component]
pub fn Patients() -> impl IntoView {
    let state = use_global();
    let patients = create_rw_signal(Vec::<Patient>::new());
    let loading = create_rw_signal(true);
    let term = create_rw_signal(String::new());
    let editing = create_rw_signal(Editing::Closed);
    let deleting = create_rw_signal(None::<Patient>);
    let selected = create_rw_signal(None::<Patient>);

    let load_state = state.clone();
    create_effect(move |_| {
        let state = load_state.clone();
        spawn_local(async move {
            match api::fetch_patients().await {
                Ok(list) => patients.set(list),
                Err(e) => {
                    patients.set(Vec::new());
                    state.show_error(&format!("Erro ao carregar pacientes: {}", e));
                }
            }
            loading.set(false);
        });
    });

    let confirm_delete = move || {
        let Some(patient) = deleting.get() else { return };
        deleting.set(None);
        let state = state.clone();
        spawn_local(async move {
            match api::delete_patient(&patient.id).await {
                Ok(()) => {
                    patients.update(|list| list.retain(|p| p.id != patient.id));
                    if selected.with(|s| s.as_ref().map(|p| p.id == patient.id)) == Some(true) {
                        selected.set(None);
                    }
                    state.show_success("Paciente excluído");
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Pacientes"</h1>
                    <p class="text-gray-500 mt-1">"Cadastro de pacientes"</p>
                </div>
                <button
                    on:click=move |_| editing.set(Editing::New)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium"
                >
                    "+ Novo paciente"
                </button>
            </div>

            <input
                type="search"
                placeholder="Buscar por nome, email ou convênio"
                prop:value=move || term.get()
                on:input=move |ev| term.set(event_target_value(&ev))
                class="w-full bg-white rounded-lg px-4 py-2 border border-gray-300"
            />

            <div class="grid lg:grid-cols-3 gap-6">
                <div class="lg:col-span-2 bg-white rounded-xl shadow-sm overflow-hidden">
                    {move || {
                        if loading.get() {
                            return view! { <div class="p-4"><ListSkeleton count=5 /></div> }.into_view();
                        }
                        let list: Vec<Patient> =
                            patients.with(|all| search(all, &term.get()).into_iter().cloned().collect());
                        if list.is_empty() {
                            return view! {
                                <p class="text-center text-gray-500 py-12">"Nenhum paciente encontrado"</p>
                            }.into_view();
                        }
                        view! {
                            <table class="w-full text-sm">
                                <thead class="bg-gray-50 text-left text-gray-500">
                                    <tr>
                                        <th class="px-4 py-2">"Nome"</th>
                                        <th class="px-4 py-2">"CPF"</th>
                                        <th class="px-4 py-2">"Convênio"</th>
                                        <th class="px-4 py-2"></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list.into_iter().map(|patient| {
                                        let for_select = patient.clone();
                                        let for_edit = patient.clone();
                                        let for_delete = patient.clone();
                                        view! {
                                            <tr class="border-t border-gray-100">
                                                <td class="px-4 py-2">
                                                    <button
                                                        on:click=move |_| selected.set(Some(for_select.clone()))
                                                        class="font-medium hover:underline"
                                                    >
                                                        {patient.name.clone()}
                                                    </button>
                                                    <div class="text-gray-500">{patient.email.clone()}</div>
                                                </td>
                                                <td class="px-4 py-2">{patient.cpf.clone().unwrap_or_default()}</td>
                                                <td class="px-4 py-2">{patient.health_insurance.clone().unwrap_or_else(|| "-".into())}</td>
                                                <td class="px-4 py-2 text-right space-x-2">
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
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }.into_view()
                    }}
                </div>

                <div class="bg-white rounded-xl p-4 shadow-sm">
                    {move || match selected.get() {
                        Some(patient) => view! { <Records patient=patient /> }.into_view(),
                        None => view! {
                            <p class="text-gray-500 text-sm">"Selecione um paciente para ver o prontuário"</p>
                        }.into_view(),
                    }}
                </div>
            </div>

            {move || {
                let existing = match editing.get() {
                    Editing::Closed => return view! {}.into_view(),
                    Editing::New => None,
                    Editing::Existing(p) => Some(p),
                };
                view! {
                    <PatientDialog
                        patient=existing
                        on_saved=move |saved: Patient| {
                            patients.update(|list| {
                                match list.iter_mut().find(|p| p.id == saved.id) {
                                    Some(slot) => *slot = saved,
                                    None => list.push(saved),
                                }
                            });
                            editing.set(Editing::Closed);
                        }
                        on_close=move || editing.set(Editing::Closed)
                    />
                }.into_view()
            }}

            {move || deleting.get().map(|patient| {
                let confirm_delete = confirm_delete.clone();
                view! {
                    <ConfirmDialog
                        title="Excluir paciente"
                        message=format!("Excluir {}? Esta ação não pode ser desfeita.", patient.name)
                        on_confirm=move || confirm_delete()
                        on_cancel=move || deleting.set(None)
                    />
                }
            })}
        </div>
    }
}

fn form_from(patient: &Patient) -> PatientForm {
    PatientForm {
        name: patient.name.clone(),
        email: patient.email.clone(),
        cpf: patient.cpf.clone().unwrap_or_default(),
        phone: patient.phone.clone(),
        date_of_birth: patient.date_of_birth.map(|d| d.to_string()),
        health_insurance: patient.health_insurance.clone(),
    }
}

#[component]
fn PatientDialog(
    patient: Option<Patient>,
    on_saved: impl Fn(Patient) + Clone + 'static,
    on_close: impl Fn() + Clone + 'static,
) -> impl IntoView {
    let state = use_global();
    let editing_id = patient.as_ref().map(|p| p.id.clone());
    let title = if patient.is_some() { "Editar paciente" } else { "Novo paciente" };
    let form = create_rw_signal(patient.as_ref().map(form_from).unwrap_or_default());
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
                Some(id) => api::update_patient(id, &current).await,
                None => api::create_patient(&current).await,
            };
            match result {
                Ok(saved) => {
                    state.show_success("Paciente salvo");
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
                    <TextField
                        label="Email"
                        input_type="email"
                        value=Signal::derive(move || form.with(|f| f.email.clone()))
                        on_input=move |v: String| form.update(|f| f.email = v)
                        error=field_error(errors, "email")
                    />
                    <TextField
                        label="CPF"
                        placeholder="000.000.000-00"
                        value=Signal::derive(move || form.with(|f| f.cpf.clone()))
                        on_input=move |v: String| form.update(|f| f.cpf = format_cpf(&v))
                        error=field_error(errors, "cpf")
                    />
                    <TextField
                        label="Telefone"
                        value=Signal::derive(move || form.with(|f| f.phone.clone().unwrap_or_default()))
                        on_input=move |v: String| form.update(|f| f.phone = Some(v))
                        error=field_error(errors, "phone")
                    />
                    <TextField
                        label="Data de nascimento"
                        input_type="date"
                        value=Signal::derive(move || form.with(|f| f.date_of_birth.clone().unwrap_or_default()))
                        on_input=move |v: String| form.update(|f| f.date_of_birth = Some(v))
                        error=field_error(errors, "dateOfBirth")
                    />
                    <TextField
                        label="Convênio"
                        value=Signal::derive(move || form.with(|f| f.health_insurance.clone().unwrap_or_default()))
                        on_input=move |v: String| form.update(|f| f.health_insurance = Some(v))
                        error=field_error(errors, "healthInsurance")
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

/// Medical records of one patient, newest first, with an add form
#[component]
fn Records(patient: Patient) -> impl IntoView {
    let state = use_global();
    let records = create_rw_signal(Vec::<MedicalRecord>::new());
    let doctors = create_rw_signal(Vec::<Doctor>::new());
    let form = create_rw_signal(MedicalRecordForm {
        patient_id: patient.id.clone(),
        date: chrono::Local::now().date_naive().to_string(),
        ..Default::default()
    });
    let errors = create_rw_signal(ValidationErrors::new());

    let patient_id = patient.id.clone();
    let load_state = state.clone();
    create_effect(move |_| {
        let state = load_state.clone();
        let patient_id = patient_id.clone();
        spawn_local(async move {
            match api::fetch_records(&patient_id).await {
                Ok(list) => records.set(list),
                Err(e) => state.show_error(&format!("Erro ao carregar prontuário: {}", e)),
            }
            match api::fetch_doctors().await {
                Ok(list) => doctors.set(list),
                Err(e) => state.show_error(&format!("Erro ao carregar médicos: {}", e)),
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let current = form.get();
        if let Err(e) = current.validate() {
            errors.set(e);
            return;
        }
        errors.set(ValidationErrors::new());

        let state = state.clone();
        spawn_local(async move {
            match api::create_record(&current).await {
                Ok(record) => {
                    records.update(|list| list.insert(0, record));
                    form.update(|f| {
                        f.diagnosis.clear();
                        f.prescription = None;
                        f.notes = None;
                    });
                    state.show_success("Registro adicionado");
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    let doctor_name = move |id: &str| {
        doctors.with(|list| {
            list.iter()
                .find(|d| d.id == id)
                .map(|d| d.name.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <h2 class="text-lg font-semibold mb-4">{format!("Prontuário de {}", patient.name)}</h2>

        <div class="space-y-3 mb-6">
            {move || {
                let list = records.get();
                if list.is_empty() {
                    return view! { <p class="text-gray-500 text-sm">"Nenhum registro"</p> }.into_view();
                }
                list.into_iter().map(|r| view! {
                    <div class="border-l-4 border-primary-300 pl-3">
                        <p class="text-xs text-gray-500">
                            {format!("{} · {}", r.date.format("%d/%m/%Y"), doctor_name(&r.doctor_id))}
                        </p>
                        <p class="font-medium">{r.diagnosis.clone()}</p>
                        {r.prescription.clone().map(|p| view! { <p class="text-sm text-gray-600">{p}</p> })}
                    </div>
                }).collect_view()
            }}
        </div>

        <form on:submit=on_submit class="space-y-3">
            <SelectField
                label="Médico"
                options=Signal::derive(move || doctors.with(|list| {
                    list.iter().map(|d| (d.id.clone(), d.name.clone())).collect()
                }))
                value=Signal::derive(move || form.with(|f| f.doctor_id.clone()))
                on_change=move |v: String| form.update(|f| f.doctor_id = v)
                error=field_error(errors, "doctorId")
            />
            <TextField
                label="Data"
                input_type="date"
                value=Signal::derive(move || form.with(|f| f.date.clone()))
                on_input=move |v: String| form.update(|f| f.date = v)
                error=field_error(errors, "date")
            />
            <TextField
                label="Diagnóstico"
                value=Signal::derive(move || form.with(|f| f.diagnosis.clone()))
                on_input=move |v: String| form.update(|f| f.diagnosis = v)
                error=field_error(errors, "diagnosis")
            />
            <TextField
                label="Prescrição"
                value=Signal::derive(move || form.with(|f| f.prescription.clone().unwrap_or_default()))
                on_input=move |v: String| form.update(|f| f.prescription = Some(v))
                error=field_error(errors, "prescription")
            />
            <button
                type="submit"
                class="w-full px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium"
            >
                "Adicionar registro"
            </button>
        </form>
    }
}
