use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{optional, required, ValidationErrors};
use crate::catalog;
use crate::model::AppointmentStatus;

/// Desktop booking form
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentForm {
    pub specialty: String,
    pub doctor_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: String,
    pub patient_id: String,
    pub reason: Option<String>,
}

/// `appointments` row payload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppointmentInput {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

pub(crate) fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl AppointmentForm {
    /// Validate against the calendar as of `today`
    pub fn validate(&self, today: NaiveDate) -> Result<AppointmentInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        required(
            &mut errors,
            "specialty",
            &self.specialty,
            "Selecione uma especialidade",
        );
        let doctor_id = required(&mut errors, "doctorId", &self.doctor_id, "Selecione um médico");
        let patient_id = required(
            &mut errors,
            "patientId",
            &self.patient_id,
            "Selecione um paciente",
        );

        let date = match self.date.trim() {
            "" => {
                errors.add("date", "Selecione uma data");
                None
            }
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) if date < today => {
                    errors.add("date", "Data não pode estar no passado");
                    None
                }
                Ok(date) if is_weekend(date) => {
                    errors.add("date", "Não há atendimento aos finais de semana");
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("date", "Data inválida");
                    None
                }
            },
        };

        let time = match self.time.trim() {
            "" => {
                errors.add("time", "Selecione um horário");
                String::new()
            }
            t if !catalog::is_offered_time(t) => {
                errors.add("time", "Horário indisponível");
                String::new()
            }
            t => t.to_string(),
        };

        let notes = optional(&self.reason);

        match date {
            Some(date) if errors.is_empty() => Ok(AppointmentInput {
                patient_id,
                doctor_id,
                date,
                time,
                status: AppointmentStatus::Scheduled,
                notes,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Wednesday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()
    }

    fn form() -> AppointmentForm {
        AppointmentForm {
            specialty: "cardiologia".into(),
            doctor_id: "d1".into(),
            date: "2025-04-10".into(),
            time: "09:30".into(),
            patient_id: "p1".into(),
            reason: Some("Dor no peito".into()),
        }
    }

    #[test]
    fn test_valid_booking() {
        let input = form().validate(today()).unwrap();
        assert_eq!(input.status, AppointmentStatus::Scheduled);
        assert_eq!(input.notes.as_deref(), Some("Dor no peito"));
        assert_eq!(input.time, "09:30");

        let wire = serde_json::to_value(&input).unwrap();
        assert_eq!(wire["patient_id"], "p1");
        assert_eq!(wire["status"], "scheduled");
        assert_eq!(wire["date"], "2025-04-10");
    }

    #[test]
    fn test_today_is_bookable() {
        let mut f = form();
        f.date = "2025-04-09".into();
        assert!(f.validate(today()).is_ok());
    }

    #[test]
    fn test_past_and_weekend_dates() {
        let mut f = form();
        f.date = "2025-04-08".into();
        assert_eq!(
            f.validate(today()).unwrap_err().get("date"),
            Some("Data não pode estar no passado")
        );

        f.date = "2025-04-12".into();
        assert_eq!(
            f.validate(today()).unwrap_err().get("date"),
            Some("Não há atendimento aos finais de semana")
        );
    }

    #[test]
    fn test_missing_selections() {
        let errors = AppointmentForm::default().validate(today()).unwrap_err();
        assert_eq!(errors.get("specialty"), Some("Selecione uma especialidade"));
        assert_eq!(errors.get("doctorId"), Some("Selecione um médico"));
        assert_eq!(errors.get("date"), Some("Selecione uma data"));
        assert_eq!(errors.get("time"), Some("Selecione um horário"));
        assert_eq!(errors.get("patientId"), Some("Selecione um paciente"));
    }

    #[test]
    fn test_time_outside_slots() {
        let mut f = form();
        f.time = "12:00".into();
        assert_eq!(
            f.validate(today()).unwrap_err().get("time"),
            Some("Horário indisponível")
        );
    }
}
