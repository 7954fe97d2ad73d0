use super::{Clinic, ClinicResult};
use crate::datastore::{Query, Table};
use crate::forms::DoctorForm;
use crate::model::{Doctor, DoctorRow};

impl Clinic {
    /// All doctors, by name
    pub async fn list_doctors(&self) -> ClinicResult<Vec<Doctor>> {
        let query = Query::new().order_by("name", true);
        self.fetch::<DoctorRow, Doctor>(Table::Doctors, &query).await
    }

    pub async fn list_doctors_by_specialty(&self, specialty: &str) -> ClinicResult<Vec<Doctor>> {
        let query = Query::new().eq("specialty", specialty).order_by("name", true);
        self.fetch::<DoctorRow, Doctor>(Table::Doctors, &query).await
    }

    pub async fn get_doctor(&self, id: &str) -> ClinicResult<Doctor> {
        self.fetch_one::<DoctorRow, Doctor>(Table::Doctors, id, Query::new())
            .await
    }

    pub async fn create_doctor(&self, form: &DoctorForm) -> ClinicResult<Doctor> {
        let input = form.validate()?;
        let doctor: Doctor = self
            .insert::<_, DoctorRow, Doctor>(Table::Doctors, &input)
            .await?;
        tracing::info!(id = %doctor.id, specialty = %doctor.specialty, "Created doctor");
        Ok(doctor)
    }

    pub async fn update_doctor(&self, id: &str, form: &DoctorForm) -> ClinicResult<Doctor> {
        let input = form.validate()?;
        let doctor: Doctor = self
            .patch::<_, DoctorRow, Doctor>(Table::Doctors, id, &input)
            .await?;
        tracing::info!(id, "Updated doctor");
        Ok(doctor)
    }

    pub async fn delete_doctor(&self, id: &str) -> ClinicResult<()> {
        self.remove(Table::Doctors, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::clinic::testing::{demo_clinic, empty_clinic};
    use crate::clinic::ClinicError;
    use crate::forms::DoctorForm;

    fn form(name: &str, specialty: &str) -> DoctorForm {
        DoctorForm {
            name: name.into(),
            email: "novo@medappt.com".into(),
            specialty: specialty.into(),
            phone: None,
            bio: None,
        }
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let clinic = demo_clinic();
        let doctors = clinic.list_doctors().await.unwrap();
        let names: Vec<&str> = doctors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Dr. Carlos Mendes", "Dr. Paulo Ribeiro", "Dra. Ana Costa", "Dra. Maria Silva"]
        );
    }

    #[tokio::test]
    async fn test_by_specialty() {
        let clinic = demo_clinic();
        let doctors = clinic.list_doctors_by_specialty("ortopedia").await.unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].id, "doc-carlos");
        assert!(clinic
            .list_doctors_by_specialty("urologia")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let clinic = empty_clinic();

        let created = clinic.create_doctor(&form("Dr. Novo", "urologia")).await.unwrap();
        assert!(!created.id.is_empty());

        let updated = clinic
            .update_doctor(&created.id, &form("Dr. Novo Nome", "urologia"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Dr. Novo Nome");

        clinic.delete_doctor(&created.id).await.unwrap();
        let err = clinic.get_doctor(&created.id).await.unwrap_err();
        assert!(matches!(err, ClinicError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_store() {
        let clinic = empty_clinic();
        let err = clinic.create_doctor(&form("", "")).await.unwrap_err();
        assert!(matches!(err, ClinicError::Validation(_)));
        assert!(clinic.list_doctors().await.unwrap().is_empty());
    }
}
