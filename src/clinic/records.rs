use super::{Clinic, ClinicResult};
use crate::datastore::{Query, Table};
use crate::forms::MedicalRecordForm;
use crate::model::{MedicalRecord, MedicalRecordRow};

impl Clinic {
    /// A patient's history, most recent first
    pub async fn list_records(&self, patient_id: &str) -> ClinicResult<Vec<MedicalRecord>> {
        let query = Query::new()
            .eq("patient_id", patient_id)
            .order_by("date", false);
        self.fetch::<MedicalRecordRow, MedicalRecord>(Table::MedicalRecords, &query)
            .await
    }

    pub async fn create_record(&self, form: &MedicalRecordForm) -> ClinicResult<MedicalRecord> {
        let input = form.validate()?;
        let record: MedicalRecord = self
            .insert::<_, MedicalRecordRow, MedicalRecord>(Table::MedicalRecords, &input)
            .await?;
        tracing::info!(id = %record.id, patient_id = %record.patient_id, "Added medical record");
        Ok(record)
    }

    pub async fn delete_record(&self, id: &str) -> ClinicResult<()> {
        self.remove(Table::MedicalRecords, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::clinic::testing::demo_clinic;
    use crate::forms::MedicalRecordForm;

    #[tokio::test]
    async fn test_history_newest_first() {
        let clinic = demo_clinic();
        let form = MedicalRecordForm {
            patient_id: "pat-joao".into(),
            doctor_id: "doc-maria".into(),
            date: "2025-04-09".into(),
            diagnosis: "Pressão controlada".into(),
            prescription: None,
            notes: Some("Manter medicação".into()),
        };
        clinic.create_record(&form).await.unwrap();

        let history = clinic.list_records("pat-joao").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].diagnosis, "Pressão controlada");
        assert!(clinic.list_records("pat-ricardo").await.unwrap().is_empty());

        clinic.delete_record(&history[0].id).await.unwrap();
        assert_eq!(clinic.list_records("pat-joao").await.unwrap().len(), 1);
    }
}
