//! Dashboard Page
//!
//! Headline counts, today's agenda and a month calendar.

use chrono::{Datelike, Duration, NaiveDate};
use leptos::*;
use medappt::dashboard::{appointments_on, month_bounds};
use medappt::model::{Appointment, DashboardSummary};

use crate::api;
use crate::components::{ListSkeleton, StatusBadge};
use crate::state::use_global;

const WEEKDAYS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_global();
    let summary = create_rw_signal(DashboardSummary::default());
    let today_list = create_rw_signal(Vec::<Appointment>::new());
    let loading = create_rw_signal(true);

    // Each load degrades on its own; a failed count leaves zeros
    create_effect(move |_| {
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_summary().await {
                Ok(s) => summary.set(s),
                Err(e) => state.show_error(&format!("Erro ao carregar resumo: {}", e)),
            }
            match api::fetch_today().await {
                Ok(list) => today_list.set(list),
                Err(e) => state.show_error(&format!("Erro ao carregar consultas: {}", e)),
            }
            loading.set(false);
        });
    });

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-500 mt-1">"Visão geral da clínica"</p>
            </div>

            <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <SummaryCard label="Consultas hoje" value=Signal::derive(move || summary.get().today_appointments) />
                <SummaryCard label="Próximas" value=Signal::derive(move || summary.get().upcoming_appointments) />
                <SummaryCard label="Médicos" value=Signal::derive(move || summary.get().total_doctors) />
                <SummaryCard label="Pacientes" value=Signal::derive(move || summary.get().total_patients) />
                <SummaryCard label="Total de consultas" value=Signal::derive(move || summary.get().total_appointments) />
                <SummaryCard label="Concluídas" value=Signal::derive(move || summary.get().completed_appointments) />
                <SummaryCard label="Canceladas" value=Signal::derive(move || summary.get().cancelled_appointments) />
            </section>

            <div class="grid md:grid-cols-2 gap-8">
                <section class="bg-white rounded-xl p-6 shadow-sm">
                    <h2 class="text-xl font-semibold mb-4">"Consultas de hoje"</h2>
                    {move || {
                        if loading.get() {
                            view! { <ListSkeleton /> }.into_view()
                        } else {
                            view! { <AppointmentRows appointments=today_list.get() /> }.into_view()
                        }
                    }}
                </section>

                <section class="bg-white rounded-xl p-6 shadow-sm">
                    <Calendar />
                </section>
            </div>
        </div>
    }
}

#[component]
fn SummaryCard(label: &'static str, #[prop(into)] value: Signal<u64>) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl p-4 shadow-sm">
            <p class="text-sm text-gray-500">{label}</p>
            <p class="text-3xl font-bold mt-1">{move || value.get()}</p>
        </div>
    }
}

#[component]
fn AppointmentRows(appointments: Vec<Appointment>) -> impl IntoView {
    if appointments.is_empty() {
        return view! { <p class="text-gray-500 text-sm">"Nenhuma consulta"</p> }.into_view();
    }

    appointments
        .into_iter()
        .map(|a| {
            view! {
                <div class="flex items-center justify-between py-2 border-b border-gray-100 last:border-0">
                    <div>
                        <span class="font-medium">{a.time.clone()}</span>
                        <span class="ml-3">{a.patient_name.clone()}</span>
                        <span class="text-gray-500 text-sm ml-2">{a.doctor_name.clone()}</span>
                    </div>
                    <StatusBadge status=a.status />
                </div>
            }
        })
        .collect_view()
}

/// Month grid; days with appointments are highlighted and clickable
#[component]
fn Calendar() -> impl IntoView {
    let state = use_global();
    let today = chrono::Local::now().date_naive();
    let month = create_rw_signal((today.year(), today.month()));
    let selected = create_rw_signal(Some(today));
    let data = create_rw_signal(api::CalendarMonth {
        busy_days: Vec::new(),
        appointments: Vec::new(),
    });

    create_effect(move |_| {
        let (year, m) = month.get();
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_calendar(year, m).await {
                Ok(month_data) => data.set(month_data),
                Err(e) => {
                    state.show_error(&format!("Erro ao carregar calendário: {}", e));
                    data.set(api::CalendarMonth {
                        busy_days: Vec::new(),
                        appointments: Vec::new(),
                    });
                }
            }
        });
    });

    let shift = move |delta: i32| {
        month.update(|(y, m)| {
            let index = *y * 12 + *m as i32 - 1 + delta;
            *y = index.div_euclid(12);
            *m = index.rem_euclid(12) as u32 + 1;
        });
        selected.set(None);
    };

    let cells = move || {
        let (year, m) = month.get();
        let Some((first, last)) = month_bounds(year, m) else {
            return Vec::new();
        };
        let lead = first.weekday().num_days_from_sunday() as usize;
        let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
        let mut day = first;
        while day <= last {
            cells.push(Some(day));
            day += Duration::days(1);
        }
        cells
    };

    view! {
        <div class="flex items-center justify-between mb-4">
            <button on:click=move |_| shift(-1) class="px-3 py-1 rounded hover:bg-gray-100">"‹"</button>
            <h2 class="text-xl font-semibold">
                {move || {
                    let (y, m) = month.get();
                    format!("{:02}/{}", m, y)
                }}
            </h2>
            <button on:click=move |_| shift(1) class="px-3 py-1 rounded hover:bg-gray-100">"›"</button>
        </div>

        <div class="grid grid-cols-7 gap-1 text-center text-sm">
            {WEEKDAYS.iter().map(|d| view! { <div class="text-gray-400 font-medium">{*d}</div> }).collect_view()}
            {move || {
                let busy = data.with(|d| d.busy_days.clone());
                cells().into_iter().map(|cell| match cell {
                    None => view! { <div /> }.into_view(),
                    Some(date) => {
                        let is_busy = busy.contains(&date);
                        let class = move || {
                            let mut class = String::from("py-2 rounded ");
                            if selected.get() == Some(date) {
                                class.push_str("bg-primary-600 text-white");
                            } else if is_busy {
                                class.push_str("bg-primary-100 text-primary-800 font-semibold");
                            } else {
                                class.push_str("hover:bg-gray-100");
                            }
                            class
                        };
                        view! {
                            <button class=class on:click=move |_| selected.set(Some(date))>
                                {date.day()}
                            </button>
                        }.into_view()
                    }
                }).collect_view()
            }}
        </div>

        <div class="mt-4">
            {move || selected.get().map(|date| {
                let day: Vec<Appointment> = data.with(|d| {
                    appointments_on(&d.appointments, date).into_iter().cloned().collect()
                });
                view! {
                    <h3 class="font-medium mb-2">{date.format("%d/%m/%Y").to_string()}</h3>
                    <AppointmentRows appointments=day />
                }
            })}
        </div>
    }
}
