use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::non_empty;

/// `medical_records` table row
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MedicalRecordRow {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub diagnosis: String,
    #[serde(default)]
    pub prescription: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub diagnosis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<MedicalRecordRow> for MedicalRecord {
    fn from(row: MedicalRecordRow) -> Self {
        Self {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            date: row.date,
            diagnosis: row.diagnosis,
            prescription: non_empty(row.prescription),
            notes: non_empty(row.notes),
        }
    }
}
