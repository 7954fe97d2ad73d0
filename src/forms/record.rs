use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{optional, required, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalRecordForm {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: String,
    pub diagnosis: String,
    pub prescription: Option<String>,
    pub notes: Option<String>,
}

/// `medical_records` row payload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MedicalRecordInput {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub prescription: Option<String>,
    pub notes: Option<String>,
}

impl MedicalRecordForm {
    pub fn validate(&self) -> Result<MedicalRecordInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let patient_id = required(&mut errors, "patientId", &self.patient_id, "Selecione um paciente");
        let doctor_id = required(&mut errors, "doctorId", &self.doctor_id, "Selecione um médico");
        let diagnosis = required(
            &mut errors,
            "diagnosis",
            &self.diagnosis,
            "Diagnóstico é obrigatório",
        );

        let date = match self.date.trim() {
            "" => {
                errors.add("date", "Selecione uma data");
                None
            }
            raw => {
                let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
                if parsed.is_none() {
                    errors.add("date", "Data inválida");
                }
                parsed
            }
        };

        let prescription = optional(&self.prescription);
        let notes = optional(&self.notes);

        match date {
            Some(date) if errors.is_empty() => Ok(MedicalRecordInput {
                patient_id,
                doctor_id,
                date,
                diagnosis,
                prescription,
                notes,
            }),
            _ => Err(errors),
        }
    }
}
