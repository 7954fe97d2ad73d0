//! Domain Model
//!
//! Entities mirrored 1:1 from the hosted data service's tables.
//!
//! Each entity comes in two shapes:
//!
//! - a `*Row` type that matches the table row (snake_case, lenient about
//!   missing optional columns), used at the data-service boundary
//! - a domain type (camelCase on the wire) handed to the UI and the API
//!
//! `From<Row>` conversions do the key renaming and default the optionals.

mod appointment;
mod availability;
mod doctor;
mod medical_record;
mod patient;
mod profile;
mod summary;

pub use appointment::{
    Appointment, AppointmentRow, AppointmentStatus, DoctorRef, InvalidStatus, PatientRef,
};
pub use availability::{Availability, AvailabilityRow};
pub use doctor::{Doctor, DoctorRow};
pub use medical_record::{MedicalRecord, MedicalRecordRow};
pub use patient::{Patient, PatientRow};
pub use profile::{Profile, ProfileRow, Role};
pub use summary::DashboardSummary;

use chrono::NaiveTime;

/// Treat empty or whitespace-only strings as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a wall-clock time as stored by the data service.
///
/// Accepts `HH:MM`, `HH:MM:SS` and `HH:MM:SS.ffffff`.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S%.f"))
        .ok()
}

/// Normalize a stored time (`09:30:00`) to the `HH:MM` form the UI shows.
pub fn normalize_clock(value: &str) -> String {
    parse_clock(value)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_formats() {
        assert_eq!(parse_clock("08:30"), NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(parse_clock("08:30:00"), NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(parse_clock("14:00:00.000"), NaiveTime::from_hms_opt(14, 0, 0));
        assert!(parse_clock("8h30").is_none());
    }

    #[test]
    fn test_normalize_clock() {
        assert_eq!(normalize_clock("09:30:00"), "09:30");
        assert_eq!(normalize_clock("17:00"), "17:00");
        assert_eq!(normalize_clock("later"), "later");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
