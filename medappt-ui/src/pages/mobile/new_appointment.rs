//! New Appointment
//!
//! Four-step booking flow. Offered times come from the doctor's live
//! schedule, so a slot taken meanwhile is rejected before submit.

use leptos::*;
use leptos_router::*;
use medappt::catalog::SPECIALTIES;
use medappt::forms::ValidationErrors;
use medappt::model::{Patient, Role};
use medappt::wizard::{BookingWizard, Schedule, WizardStep};

use crate::api;
use crate::components::{field_error, Loading, SelectField};
use crate::state::use_global;

const SCHEDULE_DAYS: u32 = 14;

const CHOICE_CLASS: &str = "w-full text-left bg-white rounded-xl p-4 shadow-sm border-2";

fn choice_class(selected: bool) -> String {
    if selected {
        format!("{} border-primary-600", CHOICE_CLASS)
    } else {
        format!("{} border-transparent", CHOICE_CLASS)
    }
}

#[component]
pub fn NewAppointment() -> impl IntoView {
    let state = use_global();
    let navigate = use_navigate();
    let wizard = create_rw_signal(BookingWizard::new(Vec::new()));
    let schedule = create_rw_signal(Schedule::new());
    let schedule_loading = create_rw_signal(false);
    let errors = create_rw_signal(ValidationErrors::new());
    let patient_id = create_rw_signal(String::new());
    let patients = create_rw_signal(None::<Vec<Patient>>);
    let submitting = create_rw_signal(false);

    // Doctor directory, and who the booking is for
    let load_state = state.clone();
    create_effect(move |_| {
        let user_id = load_state.user_id.get();
        let state = load_state.clone();
        spawn_local(async move {
            match api::fetch_doctors().await {
                Ok(list) => wizard.update(|w| w.set_doctors(list)),
                Err(e) => state.show_error(&format!("Erro ao carregar médicos: {}", e)),
            }
            match api::fetch_profile(&user_id).await {
                Ok(profile) => match (profile.role, profile.linked_id) {
                    (Role::Patient, Some(id)) => {
                        patient_id.set(id);
                        patients.set(None);
                    }
                    _ => match api::fetch_patients().await {
                        Ok(list) => patients.set(Some(list)),
                        Err(e) => state.show_error(&format!("Erro ao carregar pacientes: {}", e)),
                    },
                },
                Err(e) => state.show_error(&format!("Erro ao carregar perfil: {}", e)),
            }
        });
    });

    // Reload the schedule whenever the chosen doctor changes
    let doctor_id = create_memo(move |_| wizard.with(|w| w.doctor_id().map(str::to_string)));
    let schedule_state = state.clone();
    create_effect(move |_| {
        let doctor_id = doctor_id.get();
        schedule.set(Schedule::new());
        let Some(doctor_id) = doctor_id else { return };
        let state = schedule_state.clone();
        schedule_loading.set(true);
        spawn_local(async move {
            match api::fetch_schedule(&doctor_id, SCHEDULE_DAYS).await {
                Ok(s) => schedule.set(s),
                Err(e) => state.show_error(&format!("Erro ao carregar horários: {}", e)),
            }
            schedule_loading.set(false);
        });
    });

    let step = move || wizard.with(|w| w.step());

    let advance = move |_: ev::MouseEvent| {
        let today = chrono::Local::now().date_naive();
        let mut outcome = Ok(WizardStep::Specialty);
        wizard.update(|w| outcome = schedule.with_untracked(|s| w.advance(today, s)));
        match outcome {
            Ok(_) => errors.set(ValidationErrors::new()),
            Err(e) => errors.set(e),
        }
    };

    let back = move |_: ev::MouseEvent| {
        errors.set(ValidationErrors::new());
        wizard.update(|w| {
            w.back();
        });
    };

    let submit = move |_: ev::MouseEvent| {
        let input = match wizard.with_untracked(|w| w.submit(&patient_id.get_untracked())) {
            Ok(input) => input,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(ValidationErrors::new());
        submitting.set(true);

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::book_slot(&input).await {
                Ok(_) => {
                    state.show_success("Consulta agendada");
                    navigate("/mobile/appointments", Default::default());
                }
                Err(e) => state.show_error(&e),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Agendar consulta"</h1>
                <div class="flex space-x-1 mt-3">
                    {(1..=WizardStep::COUNT).map(|n| view! {
                        <div class=move || {
                            if n <= step().number() { "flex-1 h-1 rounded bg-primary-600" } else { "flex-1 h-1 rounded bg-gray-200" }
                        } />
                    }).collect_view()}
                </div>
                <p class="text-sm text-gray-500 mt-2">
                    {move || format!("Etapa {} de {}: {}", step().number(), WizardStep::COUNT, step().title())}
                </p>
            </div>

            {move || match step() {
                WizardStep::Specialty => view! { <SpecialtyStep wizard=wizard errors=errors /> }.into_view(),
                WizardStep::Doctor => view! { <DoctorStep wizard=wizard errors=errors /> }.into_view(),
                WizardStep::DateTime => view! {
                    <DateTimeStep wizard=wizard schedule=schedule loading=schedule_loading errors=errors />
                }.into_view(),
                WizardStep::Summary => view! {
                    <SummaryStep wizard=wizard patients=patients patient_id=patient_id errors=errors />
                }.into_view(),
            }}

            <div class="flex space-x-3">
                <Show when=move || step() != WizardStep::Specialty>
                    <button
                        on:click=back
                        class="flex-1 px-4 py-3 bg-gray-100 rounded-xl font-medium"
                    >
                        "Voltar"
                    </button>
                </Show>
                {move || {
                    if step() == WizardStep::Summary {
                        let submit = submit.clone();
                        view! {
                            <button
                                on:click=submit
                                disabled=move || submitting.get()
                                class="flex-1 px-4 py-3 bg-primary-600 disabled:bg-gray-400 text-white rounded-xl font-semibold"
                            >
                                {move || if submitting.get() { "Agendando..." } else { "Confirmar" }}
                            </button>
                        }.into_view()
                    } else {
                        view! {
                            <button
                                on:click=advance
                                class="flex-1 px-4 py-3 bg-primary-600 text-white rounded-xl font-semibold"
                            >
                                "Continuar"
                            </button>
                        }.into_view()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn StepError(errors: RwSignal<ValidationErrors>, name: &'static str) -> impl IntoView {
    let message = field_error(errors, name);
    move || message.get().map(|msg| view! { <p class="text-red-600 text-sm">{msg}</p> })
}

#[component]
fn SpecialtyStep(wizard: RwSignal<BookingWizard>, errors: RwSignal<ValidationErrors>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 gap-3">
            {SPECIALTIES.iter().map(|s| {
                let id = s.id;
                view! {
                    <button
                        class=move || choice_class(wizard.with(|w| w.specialty() == Some(id)))
                        on:click=move |_| wizard.update(|w| w.select_specialty(id))
                    >
                        {s.name}
                    </button>
                }
            }).collect_view()}
        </div>
        <StepError errors=errors name="specialty" />
    }
}

#[component]
fn DoctorStep(wizard: RwSignal<BookingWizard>, errors: RwSignal<ValidationErrors>) -> impl IntoView {
    view! {
        <div class="space-y-3">
            {move || {
                let choices: Vec<_> = wizard.with(|w| w.doctor_choices().into_iter().cloned().collect());
                if choices.is_empty() {
                    return view! {
                        <p class="text-gray-500 text-sm">"Nenhum médico nesta especialidade"</p>
                    }.into_view();
                }
                choices.into_iter().map(|d| {
                    let id = d.id.clone();
                    let selected_id = d.id.clone();
                    view! {
                        <button
                            class=move || choice_class(wizard.with(|w| w.doctor_id() == Some(selected_id.as_str())))
                            on:click=move |_| wizard.update(|w| w.select_doctor(&id))
                        >
                            <p class="font-semibold">{d.name.clone()}</p>
                            {d.bio.clone().map(|bio| view! { <p class="text-sm text-gray-500">{bio}</p> })}
                        </button>
                    }
                }).collect_view()
            }}
        </div>
        <StepError errors=errors name="doctor" />
    }
}

#[component]
fn DateTimeStep(
    wizard: RwSignal<BookingWizard>,
    schedule: RwSignal<Schedule>,
    loading: RwSignal<bool>,
    errors: RwSignal<ValidationErrors>,
) -> impl IntoView {
    let initial = wizard.with_untracked(|w| w.notes().unwrap_or_default().to_string());
    let notes = create_rw_signal(initial);

    view! {
        {move || {
            if loading.get() {
                return view! { <Loading /> }.into_view();
            }
            let dates: Vec<_> = schedule.with(|s| {
                s.iter().filter(|(_, times)| !times.is_empty()).map(|(d, _)| *d).collect()
            });
            if dates.is_empty() {
                return view! {
                    <p class="text-gray-500 text-sm">"Nenhum horário disponível nos próximos dias"</p>
                }.into_view();
            }
            view! {
                <div class="flex space-x-2 overflow-x-auto pb-2">
                    {dates.into_iter().map(|date| view! {
                        <button
                            class=move || {
                                let base = "shrink-0 px-3 py-2 rounded-lg text-sm";
                                if wizard.with(|w| w.date() == Some(date)) {
                                    format!("{} bg-primary-600 text-white", base)
                                } else {
                                    format!("{} bg-white shadow-sm", base)
                                }
                            }
                            on:click=move |_| wizard.update(|w| w.select_date(date))
                        >
                            {date.format("%d/%m").to_string()}
                        </button>
                    }).collect_view()}
                </div>
            }.into_view()
        }}
        <StepError errors=errors name="date" />

        <div class="grid grid-cols-3 gap-2">
            {move || {
                let times = wizard
                    .with(|w| w.date())
                    .and_then(|date| schedule.with(|s| s.get(&date).cloned()))
                    .unwrap_or_default();
                times.into_iter().map(|time| {
                    let chosen = time.clone();
                    let label = time.clone();
                    view! {
                        <button
                            class=move || {
                                if wizard.with(|w| w.time() == Some(time.as_str())) {
                                    "py-2 rounded-lg text-sm bg-primary-600 text-white"
                                } else {
                                    "py-2 rounded-lg text-sm bg-white shadow-sm"
                                }
                            }
                            on:click=move |_| wizard.update(|w| w.select_time(&chosen))
                        >
                            {label}
                        </button>
                    }
                }).collect_view()
            }}
        </div>
        <StepError errors=errors name="time" />

        <div>
            <label class="block text-sm text-gray-600 mb-1">"Observações"</label>
            <textarea
                prop:value=move || notes.get()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    wizard.update(|w| w.set_notes(&value));
                    notes.set(value);
                }
                class="w-full bg-white rounded-lg px-4 py-2 border border-gray-300"
                rows=3
            />
        </div>
    }
}

#[component]
fn SummaryStep(
    wizard: RwSignal<BookingWizard>,
    patients: RwSignal<Option<Vec<Patient>>>,
    patient_id: RwSignal<String>,
    errors: RwSignal<ValidationErrors>,
) -> impl IntoView {
    view! {
        {move || wizard.with(|w| w.summary()).map(|s| view! {
            <div class="bg-white rounded-xl p-4 shadow-sm space-y-2">
                <SummaryRow label="Especialidade" value=s.specialty />
                <SummaryRow label="Médico" value=s.doctor />
                <SummaryRow label="Data" value=s.date />
                <SummaryRow label="Horário" value=s.time />
                {s.notes.map(|n| view! { <SummaryRow label="Observações" value=n /> })}
            </div>
        })}

        // Staff book on behalf of a patient
        {move || patients.get().map(|list| view! {
            <SelectField
                label="Paciente"
                options=Signal::derive(move || {
                    list.iter().map(|p| (p.id.clone(), p.name.clone())).collect()
                })
                value=Signal::derive(move || patient_id.get())
                on_change=move |v: String| patient_id.set(v)
                error=field_error(errors, "patientId")
            />
        })}
        <StepError errors=errors name="step" />
    }
}

#[component]
fn SummaryRow(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="flex justify-between text-sm">
            <span class="text-gray-500">{label}</span>
            <span class="font-medium">{value}</span>
        </div>
    }
}
