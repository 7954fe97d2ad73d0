use serde::{Deserialize, Serialize};

use super::{required, ValidationErrors};
use crate::model::parse_clock;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilityForm {
    pub doctor_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

/// `doctor_availability` row payload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AvailabilityInput {
    pub doctor_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl AvailabilityForm {
    pub fn validate(&self) -> Result<AvailabilityInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let doctor_id = required(&mut errors, "doctorId", &self.doctor_id, "Selecione um médico");

        if self.day_of_week > 6 {
            errors.add("dayOfWeek", "Dia da semana inválido");
        }

        let start = parse_clock(&self.start_time);
        let end = parse_clock(&self.end_time);
        if start.is_none() {
            errors.add("startTime", "Horário inválido");
        }
        if end.is_none() {
            errors.add("endTime", "Horário inválido");
        }

        let (start, end) = match (start, end) {
            (Some(s), Some(e)) if s < e => (s, e),
            (Some(_), Some(_)) => {
                errors.add("endTime", "Horário final deve ser após o inicial");
                return Err(errors);
            }
            _ => return Err(errors),
        };

        errors.into_result(|| AvailabilityInput {
            doctor_id,
            day_of_week: self.day_of_week,
            start_time: start.format("%H:%M").to_string(),
            end_time: end.format("%H:%M").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(day: u8, start: &str, end: &str) -> AvailabilityForm {
        AvailabilityForm {
            doctor_id: "d1".into(),
            day_of_week: day,
            start_time: start.into(),
            end_time: end.into(),
        }
    }

    #[test]
    fn test_valid_window() {
        let input = form(1, "08:00", "12:00:00").validate().unwrap();
        assert_eq!(input.end_time, "12:00");
    }

    #[test]
    fn test_rejects_bad_day_and_order() {
        let errors = form(7, "08:00", "12:00").validate().unwrap_err();
        assert_eq!(errors.get("dayOfWeek"), Some("Dia da semana inválido"));

        let errors = form(2, "12:00", "08:00").validate().unwrap_err();
        assert_eq!(
            errors.get("endTime"),
            Some("Horário final deve ser após o inicial")
        );

        let errors = form(2, "08:00", "08:00").validate().unwrap_err();
        assert!(errors.get("endTime").is_some());

        let errors = form(2, "oito", "12:00").validate().unwrap_err();
        assert_eq!(errors.get("startTime"), Some("Horário inválido"));
    }
}
