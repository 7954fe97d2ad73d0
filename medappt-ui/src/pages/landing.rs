//! Landing Page
//!
//! Public entry point at `/`. The device redirect moves visitors on to
//! the admin or mobile tree once the viewport is known.

use leptos::*;
use leptos_router::*;

const FEATURES: [(&str, &str, &str); 4] = [
    ("📅", "Agendamento", "Consultas marcadas em poucos passos, pelo computador ou celular."),
    ("🩺", "Corpo clínico", "Médicos organizados por especialidade e disponibilidade."),
    ("📋", "Prontuário", "Histórico de diagnósticos e prescrições de cada paciente."),
    ("🔒", "Dados seguros", "Armazenamento em serviço gerenciado com controle de acesso."),
];

#[component]
pub fn Landing() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <section class="bg-primary-700 text-white py-20">
                <div class="container mx-auto px-4 max-w-3xl text-center space-y-6">
                    <h1 class="text-4xl font-bold">"MedAppt Connect"</h1>
                    <p class="text-lg text-primary-100">
                        "Sistema completo de gestão para sua clínica médica"
                    </p>
                    <A
                        href="/dashboard"
                        class="inline-block px-6 py-3 bg-white text-primary-700 rounded-lg font-semibold"
                    >
                        "Acessar"
                    </A>
                </div>
            </section>

            <section class="container mx-auto px-4 py-12 grid sm:grid-cols-2 lg:grid-cols-4 gap-6">
                {FEATURES.iter().map(|(icon, title, text)| view! {
                    <div class="bg-white rounded-xl p-6 shadow-sm">
                        <div class="text-3xl mb-3">{*icon}</div>
                        <h3 class="font-semibold mb-1">{*title}</h3>
                        <p class="text-sm text-gray-500">{*text}</p>
                    </div>
                }).collect_view()}
            </section>
        </div>
    }
}
