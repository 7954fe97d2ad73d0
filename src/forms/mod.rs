//! Form Validation
//!
//! Per-entity form structs as submitted by the UI (camelCase JSON).
//! `validate()` either yields the row payload for the data service
//! (snake_case, forwarded verbatim) or a [`ValidationErrors`] map of
//! field name to user-facing message.

mod appointment;
mod availability;
mod doctor;
mod patient;
mod profile;
mod record;

pub use appointment::{AppointmentForm, AppointmentInput};
pub(crate) use appointment::is_weekend;
pub use availability::{AvailabilityForm, AvailabilityInput};
pub use doctor::{DoctorForm, DoctorInput};
pub use patient::{cpf_digits, format_cpf, PatientForm, PatientInput};
pub use profile::{ProfileForm, ProfileInput};
pub use record::{MedicalRecordForm, MedicalRecordInput};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Field-level validation failures, keyed by the form's field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(name, message);
        errors
    }

    /// Record an error; the first message for a field wins
    pub fn add(&mut self, name: &str, message: impl Into<String>) {
        self.fields
            .entry(name.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

/// Email shape check (local part, domain, TLD)
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Trimmed value, `None` when blank
pub(crate) fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trimmed required value; records `message` under `field` when blank
pub(crate) fn required(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    message: &str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
    }
    trimmed.to_string()
}

pub(crate) fn check_email(errors: &mut ValidationErrors, field: &str, value: &str) -> String {
    let trimmed = value.trim();
    if !is_valid_email(trimmed) {
        errors.add(field, "Email inválido");
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("admin@medappt.com"));
        assert!(is_valid_email("  maria.silva+clinic@mail.com.br "));
        assert!(!is_valid_email("admin@medappt"));
        assert!(!is_valid_email("admin.medappt.com"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_first_message_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("cpf", "CPF deve ter 11 dígitos");
        errors.add("cpf", "CPF inválido");
        assert_eq!(errors.get("cpf"), Some("CPF deve ter 11 dígitos"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_serializes_as_map() {
        let errors = ValidationErrors::field("email", "Email inválido");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "email": "Email inválido" }));
        assert_eq!(errors.to_string(), "email: Email inválido");
    }
}
