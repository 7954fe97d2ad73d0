use serde::{Deserialize, Serialize};

use super::non_empty;

/// `doctors` table row
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DoctorRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub specialty: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A doctor as shown in lists, cards and the booking wizard
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Specialty id, e.g. `cardiologia`
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Doctor {
    /// Two-letter fallback used when there is no avatar image.
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }
}

impl From<DoctorRow> for Doctor {
    fn from(row: DoctorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            specialty: row.specialty,
            phone: non_empty(row.phone),
            bio: non_empty(row.bio),
            avatar: non_empty(row.avatar_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_to_doctor_renames_and_defaults() {
        let row: DoctorRow = serde_json::from_value(json!({
            "id": "d1",
            "name": "Dra. Maria Silva",
            "email": "maria@medappt.com",
            "specialty": "cardiologia",
            "phone": null,
            "avatar_url": "https://img/1.jpg"
        }))
        .unwrap();

        let doctor = Doctor::from(row);
        assert_eq!(doctor.avatar.as_deref(), Some("https://img/1.jpg"));
        assert!(doctor.phone.is_none());
        assert!(doctor.bio.is_none());

        let wire = serde_json::to_value(&doctor).unwrap();
        assert_eq!(wire["avatar"], "https://img/1.jpg");
        assert!(wire.get("avatar_url").is_none());
    }

    #[test]
    fn test_initials() {
        let doctor = Doctor {
            id: "d1".into(),
            name: "carlos mendes".into(),
            email: "c@x.com".into(),
            specialty: "dermatologia".into(),
            phone: None,
            bio: None,
            avatar: None,
        };
        assert_eq!(doctor.initials(), "CA");
    }
}
