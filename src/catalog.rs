//! Static Catalog
//!
//! Medical specialties and the time slots offered for booking.

use chrono::{Duration, NaiveTime};
use serde::Serialize;

/// A medical discipline tag used to filter doctor lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Specialty {
    pub id: &'static str,
    pub name: &'static str,
}

pub const SPECIALTIES: &[Specialty] = &[
    Specialty { id: "cardiologia", name: "Cardiologia" },
    Specialty { id: "dermatologia", name: "Dermatologia" },
    Specialty { id: "ginecologia", name: "Ginecologia" },
    Specialty { id: "neurologia", name: "Neurologia" },
    Specialty { id: "oftalmologia", name: "Oftalmologia" },
    Specialty { id: "ortopedia", name: "Ortopedia" },
    Specialty { id: "pediatria", name: "Pediatria" },
    Specialty { id: "psiquiatria", name: "Psiquiatria" },
    Specialty { id: "urologia", name: "Urologia" },
];

/// Slots offered by the desktop appointment form
pub const AVAILABLE_TIMES: &[&str] = &[
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "14:00", "14:30",
    "15:00", "15:30", "16:00", "16:30", "17:00",
];

/// Slots offered on the mobile wizard when a doctor has no availability windows
pub const DEFAULT_MOBILE_TIMES: &[&str] = &[
    "08:00", "08:30", "09:00", "09:30", "10:00", "14:00", "14:30", "15:00", "15:30",
];

/// Booking granularity
pub const SLOT_MINUTES: i64 = 30;

/// Look up a specialty by id (case-insensitive)
pub fn find_specialty(id: &str) -> Option<&'static Specialty> {
    SPECIALTIES.iter().find(|s| s.id.eq_ignore_ascii_case(id.trim()))
}

/// Display name for a specialty id, falling back to the id itself
pub fn specialty_name(id: &str) -> &str {
    match find_specialty(id) {
        Some(s) => s.name,
        None => id,
    }
}

/// Start times of every slot that fits entirely inside `[start, end)`.
pub fn slots_between(start: NaiveTime, end: NaiveTime) -> Vec<String> {
    let step = Duration::minutes(SLOT_MINUTES);
    let mut slots = Vec::new();
    let mut current = start;

    loop {
        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 || next > end {
            break;
        }
        slots.push(current.format("%H:%M").to_string());
        current = next;
    }

    slots
}

pub fn is_offered_time(time: &str) -> bool {
    AVAILABLE_TIMES.contains(&time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_specialty() {
        assert_eq!(find_specialty("Cardiologia").map(|s| s.name), Some("Cardiologia"));
        assert!(find_specialty("astrologia").is_none());
        assert_eq!(specialty_name("pediatria"), "Pediatria");
        assert_eq!(specialty_name("custom"), "custom");
    }

    #[test]
    fn test_slots_between() {
        let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(slots_between(start, end), vec!["08:00", "08:30", "09:00", "09:30"]);

        // A partial slot at the end is not offered
        let end = NaiveTime::from_hms_opt(9, 15, 0).unwrap();
        assert_eq!(slots_between(start, end), vec!["08:00", "08:30"]);

        assert!(slots_between(end, start).is_empty());
    }

    #[test]
    fn test_slots_near_midnight_do_not_wrap() {
        let start = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert_eq!(slots_between(start, end), vec!["23:00"]);
    }

    #[test]
    fn test_offered_times() {
        assert!(is_offered_time("08:00"));
        assert!(!is_offered_time("12:00"));
        assert_eq!(AVAILABLE_TIMES.len(), 15);
    }
}
