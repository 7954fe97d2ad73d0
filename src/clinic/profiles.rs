use super::{Clinic, ClinicError, ClinicResult};
use crate::datastore::{Query, Table};
use crate::forms::{ProfileForm, ValidationErrors};
use crate::model::{Doctor, DoctorRow, Patient, PatientRow, Profile, ProfileRow, Role};

const ADMIN_NAME: &str = "Administrador";

fn from_doctor(row: &ProfileRow, doctor: Doctor) -> Profile {
    Profile {
        id: row.id.clone(),
        role: row.role,
        linked_id: Some(doctor.id),
        name: doctor.name,
        email: doctor.email,
        phone: doctor.phone,
        bio: doctor.bio,
        avatar: doctor.avatar,
    }
}

fn from_patient(row: &ProfileRow, patient: Patient) -> Profile {
    Profile {
        id: row.id.clone(),
        role: row.role,
        linked_id: Some(patient.id),
        name: patient.name,
        email: patient.email,
        phone: patient.phone,
        bio: None,
        avatar: patient.avatar,
    }
}

fn admin(row: &ProfileRow) -> Profile {
    Profile {
        id: row.id.clone(),
        role: row.role,
        linked_id: None,
        name: ADMIN_NAME.to_string(),
        email: String::new(),
        phone: None,
        bio: None,
        avatar: None,
    }
}

impl Clinic {
    async fn profile_row(&self, user_id: &str) -> ClinicResult<ProfileRow> {
        self.fetch_one::<ProfileRow, ProfileRow>(Table::Profiles, user_id, Query::new())
            .await
    }

    /// A user's profile with contact data from the linked doctor or patient
    pub async fn get_profile(&self, user_id: &str) -> ClinicResult<Profile> {
        let row = self.profile_row(user_id).await?;

        match (row.role, row.profile_id.as_deref()) {
            (Role::Doctor, Some(linked)) => {
                let doctor = self.get_doctor(linked).await?;
                Ok(from_doctor(&row, doctor))
            }
            (Role::Patient, Some(linked)) => {
                let patient = self.get_patient(linked).await?;
                Ok(from_patient(&row, patient))
            }
            _ => Ok(admin(&row)),
        }
    }

    /// Apply the profile form to the linked row
    pub async fn update_profile(&self, user_id: &str, form: &ProfileForm) -> ClinicResult<Profile> {
        let input = form.validate()?;
        let row = self.profile_row(user_id).await?;

        let profile = match (row.role, row.profile_id.as_deref()) {
            (Role::Doctor, Some(linked)) => {
                let doctor: Doctor = self
                    .patch::<_, DoctorRow, Doctor>(Table::Doctors, linked, &input)
                    .await?;
                from_doctor(&row, doctor)
            }
            (Role::Patient, Some(linked)) => {
                // patients have no bio column
                let patient: Patient = self
                    .patch::<_, PatientRow, Patient>(Table::Patients, linked, &input.contact())
                    .await?;
                from_patient(&row, patient)
            }
            _ => {
                return Err(ClinicError::Validation(ValidationErrors::field(
                    "profile",
                    "Este perfil não possui cadastro vinculado",
                )))
            }
        };

        tracing::info!(user_id, role = %row.role, "Updated profile");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use crate::clinic::testing::demo_clinic;
    use crate::clinic::ClinicError;
    use crate::forms::ProfileForm;
    use crate::model::Role;

    fn form() -> ProfileForm {
        ProfileForm {
            name: "Dra. Maria S. Silva".into(),
            email: "maria@medappt.com".into(),
            phone: None,
            bio: Some("Cardiologia clínica".into()),
        }
    }

    #[tokio::test]
    async fn test_doctor_profile() {
        let clinic = demo_clinic();
        let profile = clinic.get_profile("usr-maria").await.unwrap();
        assert_eq!(profile.role, Role::Doctor);
        assert_eq!(profile.linked_id.as_deref(), Some("doc-maria"));
        assert_eq!(profile.name, "Dra. Maria Silva");
        assert!(profile.bio.is_some());
    }

    #[tokio::test]
    async fn test_update_writes_linked_doctor() {
        let clinic = demo_clinic();
        let profile = clinic.update_profile("usr-maria", &form()).await.unwrap();
        assert_eq!(profile.name, "Dra. Maria S. Silva");
        assert!(profile.phone.is_none());

        let doctor = clinic.get_doctor("doc-maria").await.unwrap();
        assert_eq!(doctor.email, "maria@medappt.com");
        assert_eq!(doctor.bio.as_deref(), Some("Cardiologia clínica"));
    }

    #[tokio::test]
    async fn test_doctor_can_clear_bio() {
        let clinic = demo_clinic();
        let cleared = ProfileForm {
            bio: Some(String::new()),
            ..form()
        };
        let profile = clinic.update_profile("usr-maria", &cleared).await.unwrap();
        assert!(profile.bio.is_none());

        let profile = clinic.get_profile("usr-maria").await.unwrap();
        assert!(profile.bio.is_none());
        assert!(clinic.get_doctor("doc-maria").await.unwrap().bio.is_none());
    }

    #[tokio::test]
    async fn test_update_patient_drops_bio() {
        let clinic = demo_clinic();
        let profile = clinic.update_profile("usr-joao", &form()).await.unwrap();
        assert_eq!(profile.role, Role::Patient);
        assert!(profile.bio.is_none());

        let patient = clinic.get_patient("pat-joao").await.unwrap();
        assert_eq!(patient.name, "Dra. Maria S. Silva");
        assert_eq!(patient.cpf.as_deref(), Some("123.456.789-01"));
    }

    #[tokio::test]
    async fn test_admin_has_no_linked_row() {
        let clinic = demo_clinic();
        let profile = clinic.get_profile("usr-admin").await.unwrap();
        assert_eq!(profile.role, Role::Admin);
        assert!(profile.linked_id.is_none());

        assert!(matches!(
            clinic.update_profile("usr-admin", &form()).await,
            Err(ClinicError::Validation(_))
        ));
        assert!(matches!(
            clinic.get_profile("usr-nobody").await,
            Err(ClinicError::NotFound { .. })
        ));
    }
}
