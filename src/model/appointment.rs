use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{non_empty, normalize_clock};

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    /// Value stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Label shown in badges
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Agendada",
            AppointmentStatus::Confirmed => "Confirmada",
            AppointmentStatus::Completed => "Realizada",
            AppointmentStatus::Cancelled => "Cancelada",
        }
    }

    /// Scheduled or confirmed: still going to happen
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        match next {
            AppointmentStatus::Confirmed => *self == AppointmentStatus::Scheduled,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed => self.is_open(),
            AppointmentStatus::Scheduled => false,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status string
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid appointment status: {0}")]
pub struct InvalidStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// Embedded `patients(...)` relation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatientRef {
    pub name: String,
}

/// Embedded `doctors(...)` relation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DoctorRef {
    pub name: String,
    pub specialty: String,
}

/// `appointments` row, optionally with its patient and doctor embedded
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppointmentRow {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub patients: Option<PatientRef>,
    #[serde(default)]
    pub doctors: Option<DoctorRef>,
}

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub doctor_specialty: String,
    pub date: NaiveDate,
    /// `HH:MM`
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        let (doctor_name, doctor_specialty) = match row.doctors {
            Some(d) => (d.name, d.specialty),
            None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
        };

        Self {
            id: row.id,
            patient_id: row.patient_id,
            patient_name: row
                .patients
                .map(|p| p.name)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            doctor_id: row.doctor_id,
            doctor_name,
            doctor_specialty,
            date: row.date,
            time: normalize_clock(&row.time),
            status: row.status,
            notes: non_empty(row.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!(
            "Confirmed".parse::<AppointmentStatus>(),
            Ok(AppointmentStatus::Confirmed)
        );
        assert_eq!(
            "canceled".parse::<AppointmentStatus>(),
            Ok(AppointmentStatus::Cancelled)
        );
        assert!("pending".parse::<AppointmentStatus>().is_err());
        assert_eq!(AppointmentStatus::Completed.to_string(), "completed");
        assert_eq!(AppointmentStatus::Scheduled.label(), "Agendada");
    }

    #[test]
    fn test_transitions() {
        use AppointmentStatus::*;

        assert!(Scheduled.can_transition_to(Confirmed));
        assert!(!Confirmed.can_transition_to(Confirmed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Scheduled));
    }

    #[test]
    fn test_row_with_joins() {
        let row: AppointmentRow = serde_json::from_value(json!({
            "id": "a1",
            "patient_id": "p1",
            "doctor_id": "d1",
            "date": "2025-04-05",
            "time": "09:30:00",
            "status": "scheduled",
            "notes": "",
            "patients": { "name": "Ana Costa" },
            "doctors": { "name": "Dr. Carlos Mendes", "specialty": "dermatologia" }
        }))
        .unwrap();

        let appt = Appointment::from(row);
        assert_eq!(appt.patient_name, "Ana Costa");
        assert_eq!(appt.doctor_specialty, "dermatologia");
        assert_eq!(appt.time, "09:30");
        assert!(appt.notes.is_none());
    }

    #[test]
    fn test_row_without_joins_uses_unknown() {
        let row: AppointmentRow = serde_json::from_value(json!({
            "id": "a1",
            "patient_id": "p1",
            "doctor_id": "d1",
            "date": "2025-04-05",
            "time": "09:30",
            "status": "completed",
            "patients": null
        }))
        .unwrap();

        let appt = Appointment::from(row);
        assert_eq!(appt.patient_name, "Unknown");
        assert_eq!(appt.doctor_name, "Unknown");
        assert_eq!(appt.doctor_specialty, "Unknown");
    }
}
