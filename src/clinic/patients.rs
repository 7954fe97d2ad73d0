use super::{Clinic, ClinicResult};
use crate::datastore::{Query, Table};
use crate::forms::PatientForm;
use crate::model::{Patient, PatientRow};

impl Clinic {
    pub async fn list_patients(&self) -> ClinicResult<Vec<Patient>> {
        let query = Query::new().order_by("name", true);
        self.fetch::<PatientRow, Patient>(Table::Patients, &query).await
    }

    pub async fn get_patient(&self, id: &str) -> ClinicResult<Patient> {
        self.fetch_one::<PatientRow, Patient>(Table::Patients, id, Query::new())
            .await
    }

    pub async fn create_patient(&self, form: &PatientForm) -> ClinicResult<Patient> {
        let input = form.validate()?;
        let patient: Patient = self
            .insert::<_, PatientRow, Patient>(Table::Patients, &input)
            .await?;
        tracing::info!(id = %patient.id, "Registered patient");
        Ok(patient)
    }

    pub async fn update_patient(&self, id: &str, form: &PatientForm) -> ClinicResult<Patient> {
        let input = form.validate()?;
        let patient: Patient = self
            .patch::<_, PatientRow, Patient>(Table::Patients, id, &input)
            .await?;
        tracing::info!(id, "Updated patient");
        Ok(patient)
    }

    pub async fn delete_patient(&self, id: &str) -> ClinicResult<()> {
        self.remove(Table::Patients, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::clinic::testing::{demo_clinic, empty_clinic};
    use crate::clinic::ClinicError;
    use crate::forms::PatientForm;

    fn form(cpf: &str) -> PatientForm {
        PatientForm {
            name: "Beatriz Nunes".into(),
            email: "beatriz@email.com".into(),
            cpf: cpf.into(),
            phone: Some("(21) 98888-7777".into()),
            date_of_birth: Some("1992-11-03".into()),
            health_insurance: None,
        }
    }

    #[tokio::test]
    async fn test_register_and_fetch() {
        let clinic = empty_clinic();
        let created = clinic.create_patient(&form("111.222.333-44")).await.unwrap();

        let fetched = clinic.get_patient(&created.id).await.unwrap();
        assert_eq!(fetched.cpf.as_deref(), Some("111.222.333-44"));
        assert_eq!(fetched.date_of_birth.map(|d| d.to_string()).as_deref(), Some("1992-11-03"));
        assert!(fetched.health_insurance.is_none());
    }

    #[tokio::test]
    async fn test_ten_digit_cpf_rejected() {
        let clinic = empty_clinic();
        let err = clinic.create_patient(&form("1112223334")).await.unwrap_err();
        match err {
            ClinicError::Validation(errors) => {
                assert_eq!(errors.get("cpf"), Some("CPF deve ter 11 dígitos"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let clinic = demo_clinic();
        let mut edited = form("123.456.789-01");
        edited.name = "João Souza Filho".into();

        let updated = clinic.update_patient("pat-joao", &edited).await.unwrap();
        assert_eq!(updated.name, "João Souza Filho");

        clinic.delete_patient("pat-joao").await.unwrap();
        assert_eq!(clinic.list_patients().await.unwrap().len(), 2);
        assert!(matches!(
            clinic.update_patient("pat-joao", &edited).await,
            Err(ClinicError::NotFound { .. })
        ));
    }
}
