use serde::{Deserialize, Serialize};

use super::{is_valid_email, optional, ValidationErrors};

const BIO_MAX: usize = 160;

/// Profile page form; applied to the linked doctor or patient row
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

/// Contact patch for the linked row
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProfileInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Only `doctors` has this column; `None` clears it
    pub bio: Option<String>,
}

/// The columns shared by `doctors` and `patients`
#[derive(Debug, Serialize)]
pub struct ContactPatch<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
}

impl ProfileInput {
    pub fn contact(&self) -> ContactPatch<'_> {
        ContactPatch {
            name: &self.name,
            email: &self.email,
            phone: self.phone.as_deref(),
        }
    }
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim().to_string();
        if name.chars().count() < 2 {
            errors.add("name", "Nome deve ter pelo menos 2 caracteres.");
        }

        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            errors.add("email", "E-mail inválido.");
        }

        let bio = optional(&self.bio);
        if bio.as_deref().map_or(0, |b| b.chars().count()) > BIO_MAX {
            errors.add("bio", "Bio deve ter no máximo 160 caracteres.");
        }

        let phone = optional(&self.phone);

        errors.into_result(|| ProfileInput {
            name,
            email,
            phone,
            bio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_rules() {
        let form = ProfileForm {
            name: "A".into(),
            email: "not-an-email".into(),
            phone: None,
            bio: Some("x".repeat(161)),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.get("bio").is_some());
    }

    #[test]
    fn test_bio_at_limit() {
        let form = ProfileForm {
            name: "Al".into(),
            email: "al@medappt.com".into(),
            phone: Some("(11) 99999-0000".into()),
            bio: Some("é".repeat(160)),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.bio.map(|b| b.chars().count()), Some(160));
    }

    #[test]
    fn test_cleared_bio_is_written_as_null() {
        let form = ProfileForm {
            name: "Dra. Maria Silva".into(),
            email: "maria@medappt.com".into(),
            phone: None,
            bio: Some("   ".into()),
        };
        let input = form.validate().unwrap();
        let patch = serde_json::to_value(&input).unwrap();
        assert_eq!(patch["bio"], serde_json::Value::Null);

        let contact = serde_json::to_value(input.contact()).unwrap();
        assert!(contact.get("bio").is_none());
        assert_eq!(contact["name"], "Dra. Maria Silva");
    }
}
