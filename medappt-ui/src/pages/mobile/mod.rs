//! Mobile Pages
//!
//! Screens under `/mobile`, laid out for phones with a bottom tab bar.

mod appointments;
mod doctors;
mod home;
mod new_appointment;
mod profile;

pub use appointments::MobileAppointments;
pub use doctors::MobileDoctors;
pub use home::MobileHome;
pub use new_appointment::NewAppointment;
pub use profile::MobileProfile;

use medappt::model::{Appointment, Profile, Role};

use crate::api;

/// The current user's profile and their appointments.
///
/// Patients see their own bookings; other roles see the whole agenda.
async fn load_own_appointments(user_id: &str) -> Result<(Profile, Vec<Appointment>), String> {
    let profile = api::fetch_profile(user_id).await?;
    let appointments = match (&profile.role, &profile.linked_id) {
        (Role::Patient, Some(patient_id)) => api::fetch_patient_appointments(patient_id).await?,
        _ => api::fetch_appointments().await?,
    };
    Ok((profile, appointments))
}

/// Open appointments from `today` on, soonest first
fn upcoming(mut appointments: Vec<Appointment>, today: chrono::NaiveDate) -> Vec<Appointment> {
    appointments.retain(|a| a.date >= today && a.status.is_open());
    appointments.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
    appointments
}
