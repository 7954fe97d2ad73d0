use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{check_email, optional, ValidationErrors};

const CPF_DIGITS: usize = 11;
const CPF_MAX_LEN: usize = 14;

/// Patient create/edit form as submitted by the UI
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientForm {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: Option<String>,
    /// `YYYY-MM-DD`
    pub date_of_birth: Option<String>,
    pub health_insurance: Option<String>,
}

/// `patients` row payload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PatientInput {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub health_insurance: Option<String>,
}

impl PatientForm {
    pub fn validate(&self) -> Result<PatientInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim().to_string();
        if name.chars().count() < 3 {
            errors.add("name", "Nome deve ter pelo menos 3 caracteres");
        }

        let email = check_email(&mut errors, "email", &self.email);

        let cpf = self.cpf.trim().to_string();
        let len = cpf.chars().count();
        if len < CPF_DIGITS {
            errors.add("cpf", "CPF deve ter 11 dígitos");
        } else if len > CPF_MAX_LEN || cpf_digits(&cpf).len() != CPF_DIGITS {
            errors.add("cpf", "CPF inválido");
        }

        let date_of_birth = match optional(&self.date_of_birth) {
            Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("dateOfBirth", "Data inválida");
                    None
                }
            },
            None => None,
        };

        let phone = optional(&self.phone);
        let health_insurance = optional(&self.health_insurance);

        errors.into_result(|| PatientInput {
            name,
            email,
            cpf,
            phone,
            date_of_birth,
            health_insurance,
        })
    }
}

/// Digits of a CPF with punctuation stripped
pub fn cpf_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Mask a partially typed CPF as `000.000.000-00`.
///
/// Non-digits are dropped and input beyond 11 digits is ignored, so this
/// can be applied on every keystroke.
pub fn format_cpf(value: &str) -> String {
    let digits: Vec<char> = cpf_digits(value).chars().take(CPF_DIGITS).collect();
    let mut masked = String::with_capacity(CPF_MAX_LEN);

    for (i, digit) in digits.iter().enumerate() {
        match i {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(*digit);
    }

    masked
}
