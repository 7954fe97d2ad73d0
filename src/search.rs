//! List Search
//!
//! Case-insensitive substring filtering used by the list pages. An empty
//! (or whitespace-only) term matches everything.

use crate::model::{Appointment, AppointmentStatus, Doctor, Patient};

/// A record that exposes the text fields a search box looks at
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Searchable for Doctor {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.specialty, &self.email]
    }
}

impl Searchable for Patient {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = vec![&self.name, &self.email];
        if let Some(insurance) = &self.health_insurance {
            fields.push(insurance);
        }
        fields
    }
}

impl Searchable for Appointment {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.patient_name, &self.doctor_name, &self.doctor_specialty]
    }
}

/// Items matching `term`, in their original order
pub fn search<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(term)).collect()
}

/// Appointment list filter: search term plus an optional status
pub fn filter_appointments<'a>(
    items: &'a [Appointment],
    term: &str,
    status: Option<AppointmentStatus>,
) -> Vec<&'a Appointment> {
    items
        .iter()
        .filter(|a| a.matches(term))
        .filter(|a| status.map_or(true, |s| a.status == s))
        .collect()
}

/// Doctors whose specialty id equals `specialty`
pub fn doctors_by_specialty<'a>(doctors: &'a [Doctor], specialty: &str) -> Vec<&'a Doctor> {
    doctors.iter().filter(|d| d.specialty == specialty).collect()
}
