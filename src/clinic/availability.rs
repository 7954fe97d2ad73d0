use chrono::{Days, NaiveDate};
use std::collections::HashSet;

use super::{Clinic, ClinicError, ClinicResult};
use crate::catalog;
use crate::datastore::{Query, Table};
use crate::forms::{is_weekend, AvailabilityForm, ValidationErrors};
use crate::model::{normalize_clock, AppointmentRow, AppointmentStatus, Availability, AvailabilityRow};
use crate::wizard::Schedule;

/// Longest schedule window a caller may ask for
pub const MAX_SCHEDULE_DAYS: u32 = 60;

/// Offered slots for one date given a doctor's weekly windows.
///
/// Doctors without any window fall back to the default mobile slots on
/// weekdays.
fn offered_slots(windows: &[Availability], date: NaiveDate) -> Vec<String> {
    if windows.is_empty() {
        if is_weekend(date) {
            return Vec::new();
        }
        return catalog::DEFAULT_MOBILE_TIMES
            .iter()
            .map(|t| t.to_string())
            .collect();
    }

    let mut slots: Vec<String> = windows
        .iter()
        .filter(|w| w.applies_on(date))
        .filter_map(Availability::bounds)
        .flat_map(|(start, end)| catalog::slots_between(start, end))
        .collect();
    slots.sort();
    slots.dedup();
    slots
}

impl Clinic {
    /// A doctor's weekly windows, Sunday first
    pub async fn list_availability(&self, doctor_id: &str) -> ClinicResult<Vec<Availability>> {
        let query = Query::new()
            .eq("doctor_id", doctor_id)
            .order_by("day_of_week", true)
            .order_by("start_time", true);
        self.fetch::<AvailabilityRow, Availability>(Table::DoctorAvailability, &query)
            .await
    }

    pub async fn add_availability(&self, form: &AvailabilityForm) -> ClinicResult<Availability> {
        let input = form.validate()?;
        let window: Availability = self
            .insert::<_, AvailabilityRow, Availability>(Table::DoctorAvailability, &input)
            .await?;
        tracing::info!(
            doctor_id = %window.doctor_id,
            day = window.day_of_week,
            "Added availability window"
        );
        Ok(window)
    }

    pub async fn delete_availability(&self, id: &str) -> ClinicResult<()> {
        self.remove(Table::DoctorAvailability, id).await
    }

    /// Free slots for `days` consecutive dates starting at `from`.
    ///
    /// Slots held by scheduled or confirmed appointments are removed;
    /// dates with nothing left are omitted.
    pub async fn schedule(
        &self,
        doctor_id: &str,
        from: NaiveDate,
        days: u32,
    ) -> ClinicResult<Schedule> {
        let days = days.clamp(1, MAX_SCHEDULE_DAYS);
        let to = from
            .checked_add_days(Days::new(u64::from(days) - 1))
            .ok_or_else(|| {
                ClinicError::Validation(ValidationErrors::field("from", "Data inválida"))
            })?;

        let windows = self.list_availability(doctor_id).await?;

        let booked_query = Query::new()
            .eq("doctor_id", doctor_id)
            .gte("date", from)
            .lte("date", to)
            .in_list(
                "status",
                AppointmentStatus::ALL.iter().filter(|s| s.is_open()),
            );
        let booked: HashSet<(NaiveDate, String)> = self
            .fetch::<AppointmentRow, AppointmentRow>(Table::Appointments, &booked_query)
            .await?
            .into_iter()
            .map(|row| (row.date, normalize_clock(&row.time)))
            .collect();

        let mut schedule = Schedule::new();
        let mut next = Some(from);
        while let Some(date) = next.filter(|d| *d <= to) {
            let free: Vec<String> = offered_slots(&windows, date)
                .into_iter()
                .filter(|slot| !booked.contains(&(date, slot.clone())))
                .collect();
            if !free.is_empty() {
                schedule.insert(date, free);
            }
            next = date.succ_opt();
        }

        tracing::debug!(doctor_id, dates = schedule.len(), "Computed schedule");
        Ok(schedule)
    }

    /// Free slots on a single date
    pub async fn day_schedule(&self, doctor_id: &str, date: NaiveDate) -> ClinicResult<Vec<String>> {
        let mut schedule = self.schedule(doctor_id, date, 1).await?;
        Ok(schedule.remove(&date).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic::testing::{demo_clinic, today};

    #[tokio::test]
    async fn test_windows_sorted() {
        let clinic = demo_clinic();
        let windows = clinic.list_availability("doc-carlos").await.unwrap();
        let days: Vec<u8> = windows.iter().map(|w| w.day_of_week).collect();
        assert_eq!(days, vec![1, 3]);
        assert_eq!(windows[0].start_time, "14:00");
    }

    #[tokio::test]
    async fn test_schedule_excludes_booked_and_off_days() {
        let clinic = demo_clinic();
        // Wed 9th .. Tue 15th
        let schedule = clinic.schedule("doc-maria", today(), 7).await.unwrap();

        // Weekend dropped, five weekdays kept
        assert_eq!(schedule.len(), 5);
        let wednesday = &schedule[&today()];
        assert_eq!(wednesday.len(), 7);
        assert!(!wednesday.contains(&"10:00".to_string()));
        assert_eq!(wednesday.first().map(String::as_str), Some("08:00"));
        assert_eq!(wednesday.last().map(String::as_str), Some("11:30"));
    }

    #[tokio::test]
    async fn test_cancelled_slot_is_free_again() {
        let clinic = demo_clinic();
        clinic.cancel_appointment("apt-3").await.unwrap();
        let slots = clinic.day_schedule("doc-maria", today()).await.unwrap();
        assert!(slots.contains(&"10:00".to_string()));
    }

    #[tokio::test]
    async fn test_doctor_without_windows_uses_defaults() {
        let clinic = demo_clinic();
        // Ana has no windows and a 15:00 booking today
        let slots = clinic.day_schedule("doc-ana", today()).await.unwrap();
        assert_eq!(slots.len(), catalog::DEFAULT_MOBILE_TIMES.len() - 1);
        assert!(!slots.contains(&"15:00".to_string()));

        let saturday = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
        assert!(clinic.day_schedule("doc-ana", saturday).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schedule_at_end_of_calendar() {
        let clinic = demo_clinic();

        let last = NaiveDate::MAX;
        let err = clinic.schedule("doc-maria", last, 3).await.unwrap_err();
        match err {
            ClinicError::Validation(fields) => {
                assert_eq!(fields.get("from"), Some("Data inválida"))
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // A single day on the last representable date still works
        assert!(clinic.schedule("doc-maria", last, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_add_window_validates() {
        let clinic = demo_clinic();
        let form = AvailabilityForm {
            doctor_id: "doc-ana".into(),
            day_of_week: 6,
            start_time: "09:00".into(),
            end_time: "10:00".into(),
        };
        clinic.add_availability(&form).await.unwrap();

        let saturday = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
        let slots = clinic.day_schedule("doc-ana", saturday).await.unwrap();
        assert_eq!(slots, vec!["09:00", "09:30"]);

        let bad = AvailabilityForm {
            day_of_week: 9,
            ..form
        };
        assert!(matches!(
            clinic.add_availability(&bad).await,
            Err(ClinicError::Validation(_))
        ));
    }
}
