use leptos::*;
use medappt::model::AppointmentStatus;

/// Colored pill with the status label
#[component]
pub fn StatusBadge(status: AppointmentStatus) -> impl IntoView {
    let color = match status {
        AppointmentStatus::Scheduled => "bg-blue-100 text-blue-800",
        AppointmentStatus::Confirmed => "bg-green-100 text-green-800",
        AppointmentStatus::Completed => "bg-gray-100 text-gray-800",
        AppointmentStatus::Cancelled => "bg-red-100 text-red-800",
    };

    view! {
        <span class=format!("{} text-xs px-2 py-0.5 rounded-full font-medium", color)>
            {status.label()}
        </span>
    }
}
