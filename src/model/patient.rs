use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::non_empty;

/// `patients` table row
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatientRow {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub health_insurance: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_insurance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            cpf: non_empty(row.cpf),
            phone: non_empty(row.phone),
            date_of_birth: row.date_of_birth,
            health_insurance: non_empty(row.health_insurance),
            avatar: non_empty(row.avatar_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patient_wire_names() {
        let row: PatientRow = serde_json::from_value(json!({
            "id": "p1",
            "name": "João Souza",
            "email": "joao@example.com",
            "date_of_birth": "1988-02-14",
            "health_insurance": "Unimed"
        }))
        .unwrap();

        let patient = Patient::from(row);
        let wire = serde_json::to_value(&patient).unwrap();
        assert_eq!(wire["dateOfBirth"], "1988-02-14");
        assert_eq!(wire["healthInsurance"], "Unimed");
        assert!(wire.get("cpf").is_none());
    }
}
