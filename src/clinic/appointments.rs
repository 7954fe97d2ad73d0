use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Clinic, ClinicError, ClinicResult};
use crate::datastore::{Embed, Query, Table};
use crate::forms::{AppointmentForm, AppointmentInput, ValidationErrors};
use crate::model::{Appointment, AppointmentRow, AppointmentStatus};

/// Optional filters for appointment listings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    /// Inclusive range start
    pub from: Option<NaiveDate>,
    /// Inclusive range end
    pub to: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    pub doctor_id: Option<String>,
    pub patient_id: Option<String>,
}

impl AppointmentFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }

    fn to_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(date) = self.date {
            query = query.eq("date", date);
        }
        if let Some(from) = self.from {
            query = query.gte("date", from);
        }
        if let Some(to) = self.to {
            query = query.lte("date", to);
        }
        if let Some(status) = self.status {
            query = query.eq("status", status);
        }
        if let Some(doctor_id) = &self.doctor_id {
            query = query.eq("doctor_id", doctor_id);
        }
        if let Some(patient_id) = &self.patient_id {
            query = query.eq("patient_id", patient_id);
        }
        query
    }
}

fn with_people(query: Query) -> Query {
    query.embed(Embed::Patient).embed(Embed::Doctor)
}

impl Clinic {
    /// Appointments with patient and doctor names, in calendar order
    pub async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> ClinicResult<Vec<Appointment>> {
        let query = with_people(filter.to_query())
            .order_by("date", true)
            .order_by("time", true);
        self.fetch::<AppointmentRow, Appointment>(Table::Appointments, &query)
            .await
    }

    pub async fn get_appointment(&self, id: &str) -> ClinicResult<Appointment> {
        self.fetch_one::<AppointmentRow, Appointment>(
            Table::Appointments,
            id,
            with_people(Query::new()),
        )
        .await
    }

    /// Desktop booking form
    pub async fn book_appointment(
        &self,
        form: &AppointmentForm,
        today: NaiveDate,
    ) -> ClinicResult<Appointment> {
        let input = form.validate(today)?;
        self.create_appointment(&input).await
    }

    /// Wizard booking: the slot must still be free in the doctor's schedule
    pub async fn book_slot(
        &self,
        input: &AppointmentInput,
        today: NaiveDate,
    ) -> ClinicResult<Appointment> {
        if input.patient_id.trim().is_empty() {
            return Err(ValidationErrors::field("patientId", "Selecione um paciente").into());
        }
        if input.date < today {
            return Err(ValidationErrors::field("date", "Data não pode estar no passado").into());
        }

        let free = self.day_schedule(&input.doctor_id, input.date).await?;
        if !free.contains(&input.time) {
            return Err(ValidationErrors::field("time", "Horário indisponível").into());
        }

        let input = AppointmentInput {
            status: AppointmentStatus::Scheduled,
            ..input.clone()
        };
        self.create_appointment(&input).await
    }

    async fn create_appointment(&self, input: &AppointmentInput) -> ClinicResult<Appointment> {
        let created: Appointment = self
            .insert::<_, AppointmentRow, Appointment>(Table::Appointments, input)
            .await?;
        tracing::info!(
            id = %created.id,
            doctor_id = %created.doctor_id,
            date = %created.date,
            time = %created.time,
            "Booked appointment"
        );
        Ok(created)
    }

    /// Move an appointment to `next` if its current status allows it
    pub async fn set_status(
        &self,
        id: &str,
        next: AppointmentStatus,
    ) -> ClinicResult<Appointment> {
        let mut appointment = self.get_appointment(id).await?;
        let current = appointment.status;

        if !current.can_transition_to(next) {
            tracing::warn!(id, from = %current, to = %next, "Rejected status change");
            return Err(ClinicError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        self.store
            .update(
                Table::Appointments,
                id,
                serde_json::json!({ "status": next }),
            )
            .await?;
        tracing::info!(id, from = %current, to = %next, "Appointment status changed");

        appointment.status = next;
        Ok(appointment)
    }

    pub async fn confirm_appointment(&self, id: &str) -> ClinicResult<Appointment> {
        self.set_status(id, AppointmentStatus::Confirmed).await
    }

    pub async fn cancel_appointment(&self, id: &str) -> ClinicResult<Appointment> {
        self.set_status(id, AppointmentStatus::Cancelled).await
    }

    pub async fn complete_appointment(&self, id: &str) -> ClinicResult<Appointment> {
        self.set_status(id, AppointmentStatus::Completed).await
    }

    pub async fn delete_appointment(&self, id: &str) -> ClinicResult<()> {
        self.remove(Table::Appointments, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic::testing::{demo_clinic, today};

    #[tokio::test]
    async fn test_list_joins_names_in_order() {
        let clinic = demo_clinic();
        let all = clinic
            .list_appointments(&AppointmentFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].id, "apt-1");
        assert_eq!(all[0].patient_name, "João Souza");
        assert_eq!(all[0].doctor_specialty, "cardiologia");
        assert_eq!(all[0].time, "09:00");

        let todays = clinic
            .list_appointments(&AppointmentFilter::on(today()))
            .await
            .unwrap();
        let ids: Vec<&str> = todays.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["apt-3", "apt-4"]);
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let clinic = demo_clinic();
        let filter = AppointmentFilter {
            from: Some(today()),
            status: Some(AppointmentStatus::Scheduled),
            ..Default::default()
        };
        assert_eq!(clinic.list_appointments(&filter).await.unwrap().len(), 3);

        let filter = AppointmentFilter {
            patient_id: Some("pat-joao".into()),
            to: Some(today()),
            ..Default::default()
        };
        assert_eq!(clinic.list_appointments(&filter).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_join_shows_unknown() {
        let clinic = demo_clinic();
        clinic.delete_doctor("doc-paulo").await.unwrap();
        let appointment = clinic.get_appointment("apt-5").await.unwrap();
        assert_eq!(appointment.doctor_name, "Unknown");
        assert_eq!(appointment.patient_name, "Fernanda Lima");
    }

    #[tokio::test]
    async fn test_book_from_form() {
        let clinic = demo_clinic();
        let form = AppointmentForm {
            specialty: "pediatria".into(),
            doctor_id: "doc-ana".into(),
            date: "2025-04-10".into(),
            time: "11:00".into(),
            patient_id: "pat-ricardo".into(),
            reason: None,
        };
        let booked = clinic.book_appointment(&form, today()).await.unwrap();
        assert_eq!(booked.status, AppointmentStatus::Scheduled);

        let fetched = clinic.get_appointment(&booked.id).await.unwrap();
        assert_eq!(fetched.doctor_name, "Dra. Ana Costa");
    }

    #[tokio::test]
    async fn test_book_slot_checks_schedule() {
        let clinic = demo_clinic();
        // Maria works weekday mornings; 10:00 today is already taken
        let mut input = AppointmentInput {
            patient_id: "pat-ricardo".into(),
            doctor_id: "doc-maria".into(),
            date: today(),
            time: "10:00".into(),
            status: AppointmentStatus::Completed,
            notes: None,
        };
        let err = clinic.book_slot(&input, today()).await.unwrap_err();
        assert!(matches!(err, ClinicError::Validation(_)));

        input.time = "10:30".into();
        let booked = clinic.book_slot(&input, today()).await.unwrap();
        assert_eq!(booked.status, AppointmentStatus::Scheduled);

        input.date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert!(clinic.book_slot(&input, today()).await.is_err());
    }

    #[tokio::test]
    async fn test_status_lifecycle() {
        let clinic = demo_clinic();

        let confirmed = clinic.confirm_appointment("apt-4").await.unwrap();
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
        assert_eq!(confirmed.patient_name, "Ricardo Alves");

        let completed = clinic.complete_appointment("apt-4").await.unwrap();
        assert_eq!(completed.status, AppointmentStatus::Completed);

        let err = clinic.cancel_appointment("apt-4").await.unwrap_err();
        assert!(matches!(
            err,
            ClinicError::InvalidTransition {
                from: AppointmentStatus::Completed,
                to: AppointmentStatus::Cancelled
            }
        ));

        // Stored status is what the last successful change wrote
        let stored = clinic.get_appointment("apt-4").await.unwrap();
        assert_eq!(stored.status, AppointmentStatus::Completed);
    }

    #[tokio::test]
    async fn test_confirm_only_from_scheduled() {
        let clinic = demo_clinic();
        assert!(clinic.confirm_appointment("apt-3").await.is_err());
        assert!(clinic.cancel_appointment("apt-3").await.is_ok());
        assert!(matches!(
            clinic.confirm_appointment("missing").await,
            Err(ClinicError::NotFound { .. })
        ));
    }
}
