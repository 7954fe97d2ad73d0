use serde::{Deserialize, Serialize};

use super::{check_email, optional, required, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorForm {
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

/// `doctors` row payload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DoctorInput {
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

impl DoctorForm {
    pub fn validate(&self) -> Result<DoctorInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required(&mut errors, "name", &self.name, "Nome é obrigatório");
        let specialty = required(
            &mut errors,
            "specialty",
            &self.specialty,
            "Especialidade é obrigatória",
        );
        let email = if self.email.trim().is_empty() {
            errors.add("email", "Email é obrigatório");
            String::new()
        } else {
            check_email(&mut errors, "email", &self.email)
        };

        let phone = optional(&self.phone);
        let bio = optional(&self.bio);

        errors.into_result(|| DoctorInput {
            name,
            email,
            specialty,
            phone,
            bio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let errors = DoctorForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Nome é obrigatório"));
        assert_eq!(errors.get("specialty"), Some("Especialidade é obrigatória"));
        assert_eq!(errors.get("email"), Some("Email é obrigatório"));
    }

    #[test]
    fn test_valid_doctor() {
        let form = DoctorForm {
            name: " Dr. Carlos Mendes ".into(),
            email: "carlos@medappt.com".into(),
            specialty: "ortopedia".into(),
            phone: Some(String::new()),
            bio: Some("Especialista em joelho".into()),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.name, "Dr. Carlos Mendes");
        assert!(input.phone.is_none());
        assert_eq!(input.bio.as_deref(), Some("Especialista em joelho"));
    }

    #[test]
    fn test_malformed_email() {
        let form = DoctorForm {
            name: "Ana".into(),
            email: "ana@".into(),
            specialty: "pediatria".into(),
            ..Default::default()
        };
        assert_eq!(
            form.validate().unwrap_err().get("email"),
            Some("Email inválido")
        );
    }
}
