//! Dashboard Aggregation
//!
//! Headline counts for the admin dashboard plus the calendar helpers the
//! appointment calendar uses. Counting is delegated to the data service;
//! the calendar helpers work on an already-loaded list.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use crate::model::Appointment;

/// Appointments on `date`, earliest first
pub fn appointments_on(appointments: &[Appointment], date: NaiveDate) -> Vec<&Appointment> {
    let mut day: Vec<&Appointment> = appointments.iter().filter(|a| a.date == date).collect();
    day.sort_by(|a, b| a.time.cmp(&b.time));
    day
}

/// Dates in `year`/`month` that have at least one appointment
pub fn busy_days(appointments: &[Appointment], year: i32, month: u32) -> BTreeSet<NaiveDate> {
    appointments
        .iter()
        .filter(|a| a.date.year() == year && a.date.month() == month)
        .map(|a| a.date)
        .collect()
}

/// First and last day of a month; `None` for an invalid month
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

#[cfg(feature = "server")]
mod load {
    use chrono::NaiveDate;

    use super::month_bounds;
    use crate::clinic::{AppointmentFilter, Clinic, ClinicResult};
    use crate::datastore::{Query, Table};
    use crate::forms::ValidationErrors;
    use crate::model::{Appointment, AppointmentStatus, DashboardSummary};

    impl Clinic {
        /// Seven independent counts, each its own remote call
        pub async fn dashboard_summary(&self, today: NaiveDate) -> ClinicResult<DashboardSummary> {
            let store = self.store();
            let open = AppointmentStatus::ALL.iter().filter(|s| s.is_open());

            let summary = DashboardSummary {
                total_appointments: store.count(Table::Appointments, &Query::new()).await?,
                today_appointments: store
                    .count(Table::Appointments, &Query::new().eq("date", today))
                    .await?,
                upcoming_appointments: store
                    .count(
                        Table::Appointments,
                        &Query::new().gte("date", today).in_list("status", open),
                    )
                    .await?,
                completed_appointments: store
                    .count(
                        Table::Appointments,
                        &Query::new().eq("status", AppointmentStatus::Completed),
                    )
                    .await?,
                cancelled_appointments: store
                    .count(
                        Table::Appointments,
                        &Query::new().eq("status", AppointmentStatus::Cancelled),
                    )
                    .await?,
                total_doctors: store.count(Table::Doctors, &Query::new()).await?,
                total_patients: store.count(Table::Patients, &Query::new()).await?,
            };

            tracing::debug!(?summary, "Dashboard summary");
            Ok(summary)
        }

        pub async fn todays_appointments(&self, today: NaiveDate) -> ClinicResult<Vec<Appointment>> {
            self.list_appointments(&AppointmentFilter::on(today)).await
        }

        /// Every appointment in a calendar month
        pub async fn month_appointments(
            &self,
            year: i32,
            month: u32,
        ) -> ClinicResult<Vec<Appointment>> {
            let (first, last) = month_bounds(year, month)
                .ok_or_else(|| ValidationErrors::field("month", "Mês inválido"))?;
            let filter = AppointmentFilter {
                from: Some(first),
                to: Some(last),
                ..Default::default()
            };
            self.list_appointments(&filter).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppointmentStatus;

    fn appointment(id: &str, date: (i32, u32, u32), time: &str) -> Appointment {
        Appointment {
            id: id.into(),
            patient_id: "p".into(),
            patient_name: "P".into(),
            doctor_id: "d".into(),
            doctor_name: "D".into(),
            doctor_specialty: "cardiologia".into(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: time.into(),
            status: AppointmentStatus::Scheduled,
            notes: None,
        }
    }

    #[test]
    fn test_appointments_on_sorted_by_time() {
        let list = vec![
            appointment("a", (2025, 4, 10), "15:00"),
            appointment("b", (2025, 4, 10), "08:30"),
            appointment("c", (2025, 4, 11), "07:00"),
        ];
        let day = appointments_on(&list, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
        let ids: Vec<&str> = day.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_busy_days() {
        let list = vec![
            appointment("a", (2025, 4, 10), "15:00"),
            appointment("b", (2025, 4, 10), "08:30"),
            appointment("c", (2025, 5, 2), "07:00"),
        ];
        let days = busy_days(&list, 2025, 4);
        assert_eq!(days.len(), 1);
        assert!(busy_days(&list, 2025, 6).is_empty());
    }

    #[test]
    fn test_month_bounds() {
        let (first, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(first.to_string(), "2024-02-01");
        assert_eq!(last.to_string(), "2024-02-29");

        let (_, last) = month_bounds(2025, 12).unwrap();
        assert_eq!(last.to_string(), "2025-12-31");
        assert!(month_bounds(2025, 13).is_none());
    }

    #[cfg(feature = "server")]
    mod counts {
        use crate::clinic::testing::{demo_clinic, empty_clinic, today};
        use crate::model::DashboardSummary;

        #[tokio::test]
        async fn test_summary_counts() {
            let clinic = demo_clinic();
            let summary = clinic.dashboard_summary(today()).await.unwrap();
            assert_eq!(
                summary,
                DashboardSummary {
                    total_appointments: 6,
                    today_appointments: 2,
                    upcoming_appointments: 4,
                    completed_appointments: 1,
                    cancelled_appointments: 1,
                    total_doctors: 4,
                    total_patients: 3,
                }
            );
        }

        #[tokio::test]
        async fn test_summary_tracks_changes() {
            let clinic = demo_clinic();
            clinic.cancel_appointment("apt-4").await.unwrap();
            let summary = clinic.dashboard_summary(today()).await.unwrap();
            assert_eq!(summary.upcoming_appointments, 3);
            assert_eq!(summary.cancelled_appointments, 2);
            assert_eq!(summary.today_appointments, 2);
        }

        #[tokio::test]
        async fn test_empty_clinic_is_all_zero() {
            let summary = empty_clinic().dashboard_summary(today()).await.unwrap();
            assert_eq!(summary, DashboardSummary::default());
        }

        #[tokio::test]
        async fn test_month_listing() {
            let clinic = demo_clinic();
            // demo spans 2025-04-02 .. 2025-04-17
            assert_eq!(clinic.month_appointments(2025, 4).await.unwrap().len(), 6);
            assert!(clinic.month_appointments(2025, 5).await.unwrap().is_empty());
            assert!(clinic.month_appointments(2025, 0).await.is_err());
            assert_eq!(clinic.todays_appointments(today()).await.unwrap().len(), 2);
        }
    }
}
