//! Booking Wizard
//!
//! State machine behind the mobile "new appointment" page:
//! Specialty → Doctor → DateTime → Summary. Each `advance` only checks
//! the fields owned by the current step; `submit` is only possible from
//! the summary and produces the `appointments` insert payload.
//!
//! The wizard is UI state only. Offered times come in as a [`Schedule`]
//! computed elsewhere (from doctor availability and booked slots).

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog;
use crate::forms::{AppointmentInput, ValidationErrors};
use crate::model::{AppointmentStatus, Doctor};
use crate::search::doctors_by_specialty;

/// Offered `HH:MM` start times per date
pub type Schedule = BTreeMap<NaiveDate, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Specialty,
    Doctor,
    DateTime,
    Summary,
}

impl WizardStep {
    pub const COUNT: usize = 4;

    /// 1-based position for the progress indicator
    pub fn number(&self) -> usize {
        match self {
            WizardStep::Specialty => 1,
            WizardStep::Doctor => 2,
            WizardStep::DateTime => 3,
            WizardStep::Summary => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Specialty => "Especialidade",
            WizardStep::Doctor => "Médico",
            WizardStep::DateTime => "Data e Hora",
            WizardStep::Summary => "Confirmação",
        }
    }

    fn next(self) -> WizardStep {
        match self {
            WizardStep::Specialty => WizardStep::Doctor,
            WizardStep::Doctor => WizardStep::DateTime,
            WizardStep::DateTime | WizardStep::Summary => WizardStep::Summary,
        }
    }

    fn previous(self) -> WizardStep {
        match self {
            WizardStep::Specialty | WizardStep::Doctor => WizardStep::Specialty,
            WizardStep::DateTime => WizardStep::Doctor,
            WizardStep::Summary => WizardStep::DateTime,
        }
    }
}

/// What the summary card shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub specialty: String,
    pub doctor: String,
    /// `dd/mm/yyyy`
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    doctors: Vec<Doctor>,
    specialty: Option<String>,
    doctor_id: Option<String>,
    date: Option<NaiveDate>,
    time: Option<String>,
    notes: Option<String>,
}

impl BookingWizard {
    /// Start a booking over the given doctor directory
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self {
            step: WizardStep::Specialty,
            doctors,
            specialty: None,
            doctor_id: None,
            date: None,
            time: None,
            notes: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn specialty(&self) -> Option<&str> {
        self.specialty.as_deref()
    }

    pub fn doctor_id(&self) -> Option<&str> {
        self.doctor_id.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Replace the doctor directory (e.g. after it finishes loading)
    pub fn set_doctors(&mut self, doctors: Vec<Doctor>) {
        self.doctors = doctors;
    }

    /// Changing the specialty invalidates the chosen doctor
    pub fn select_specialty(&mut self, specialty: &str) {
        if self.specialty.as_deref() != Some(specialty) {
            self.doctor_id = None;
        }
        self.specialty = Some(specialty.to_string());
    }

    pub fn select_doctor(&mut self, doctor_id: &str) {
        self.doctor_id = Some(doctor_id.to_string());
    }

    /// Changing the date invalidates the chosen time
    pub fn select_date(&mut self, date: NaiveDate) {
        if self.date != Some(date) {
            self.time = None;
        }
        self.date = Some(date);
    }

    pub fn select_time(&mut self, time: &str) {
        self.time = Some(time.to_string());
    }

    pub fn set_notes(&mut self, notes: &str) {
        let trimmed = notes.trim();
        self.notes = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Doctors offered for the chosen specialty
    pub fn doctor_choices(&self) -> Vec<&Doctor> {
        match &self.specialty {
            Some(specialty) => doctors_by_specialty(&self.doctors, specialty),
            None => Vec::new(),
        }
    }

    fn selected_doctor(&self) -> Option<&Doctor> {
        let id = self.doctor_id.as_deref()?;
        self.doctor_choices().into_iter().find(|d| d.id == id)
    }

    /// Validate the current step and move forward.
    ///
    /// On the summary step this is a no-op; use [`BookingWizard::submit`].
    pub fn advance(
        &mut self,
        today: NaiveDate,
        schedule: &Schedule,
    ) -> Result<WizardStep, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match self.step {
            WizardStep::Specialty => {
                let known = self
                    .specialty
                    .as_deref()
                    .and_then(catalog::find_specialty)
                    .is_some();
                if !known {
                    errors.add("specialty", "Selecione uma especialidade");
                }
            }
            WizardStep::Doctor => {
                if self.selected_doctor().is_none() {
                    errors.add("doctor", "Selecione um médico");
                }
            }
            WizardStep::DateTime => self.check_date_time(today, schedule, &mut errors),
            WizardStep::Summary => return Ok(self.step),
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    fn check_date_time(&self, today: NaiveDate, schedule: &Schedule, errors: &mut ValidationErrors) {
        let offered = match self.date {
            None => {
                errors.add("date", "Selecione uma data");
                None
            }
            Some(date) if date < today => {
                errors.add("date", "Data não pode estar no passado");
                None
            }
            Some(date) => match schedule.get(&date) {
                Some(times) if !times.is_empty() => Some(times),
                _ => {
                    errors.add("date", "Nenhum horário disponível nesta data");
                    None
                }
            },
        };

        match (&self.time, offered) {
            (None, _) => errors.add("time", "Selecione um horário"),
            (Some(time), Some(times)) if !times.contains(time) => {
                errors.add("time", "Horário indisponível")
            }
            _ => {}
        }
    }

    /// Return to the previous step; selections are kept
    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    /// Everything chosen so far, once every selection is present
    pub fn summary(&self) -> Option<BookingSummary> {
        let specialty = self.specialty.as_deref()?;
        let doctor = self.selected_doctor()?;
        let date = self.date?;
        let time = self.time.clone()?;

        Some(BookingSummary {
            specialty: catalog::specialty_name(specialty).to_string(),
            doctor: doctor.name.clone(),
            date: date.format("%d/%m/%Y").to_string(),
            time,
            notes: self.notes.clone(),
        })
    }

    /// Build the insert payload for `patient_id`
    pub fn submit(&self, patient_id: &str) -> Result<AppointmentInput, ValidationErrors> {
        if self.step != WizardStep::Summary {
            return Err(ValidationErrors::field(
                "step",
                "Conclua todas as etapas antes de confirmar",
            ));
        }
        if patient_id.trim().is_empty() {
            return Err(ValidationErrors::field("patientId", "Selecione um paciente"));
        }

        match (&self.doctor_id, self.date, &self.time) {
            (Some(doctor_id), Some(date), Some(time)) => Ok(AppointmentInput {
                patient_id: patient_id.trim().to_string(),
                doctor_id: doctor_id.clone(),
                date,
                time: time.clone(),
                status: AppointmentStatus::Scheduled,
                notes: self.notes.clone(),
            }),
            _ => Err(ValidationErrors::field(
                "step",
                "Conclua todas as etapas antes de confirmar",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(id: &str, name: &str, specialty: &str) -> Doctor {
        Doctor {
            id: id.into(),
            name: name.into(),
            email: format!("{}@medappt.com", id),
            specialty: specialty.into(),
            phone: None,
            bio: None,
            avatar: None,
        }
    }

    fn wizard() -> BookingWizard {
        BookingWizard::new(vec![
            doctor("d1", "Dra. Maria Silva", "cardiologia"),
            doctor("d2", "Dr. Carlos Mendes", "ortopedia"),
        ])
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()
    }

    fn schedule() -> Schedule {
        let mut schedule = Schedule::new();
        schedule.insert(
            NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
            vec!["08:00".into(), "08:30".into()],
        );
        schedule
    }

    #[test]
    fn test_full_flow() {
        let mut w = wizard();
        let s = schedule();

        w.select_specialty("cardiologia");
        assert_eq!(w.advance(today(), &s), Ok(WizardStep::Doctor));

        assert_eq!(w.doctor_choices().len(), 1);
        w.select_doctor("d1");
        assert_eq!(w.advance(today(), &s), Ok(WizardStep::DateTime));

        w.select_date(NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
        w.select_time("08:30");
        w.set_notes("  Retorno ");
        assert_eq!(w.advance(today(), &s), Ok(WizardStep::Summary));

        let summary = w.summary().unwrap();
        assert_eq!(summary.specialty, "Cardiologia");
        assert_eq!(summary.doctor, "Dra. Maria Silva");
        assert_eq!(summary.date, "10/04/2025");
        assert_eq!(summary.notes.as_deref(), Some("Retorno"));

        let input = w.submit("p1").unwrap();
        assert_eq!(input.doctor_id, "d1");
        assert_eq!(input.time, "08:30");
        assert_eq!(input.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_step_gating_messages() {
        let mut w = wizard();
        let s = schedule();

        let err = w.advance(today(), &s).unwrap_err();
        assert_eq!(err.get("specialty"), Some("Selecione uma especialidade"));
        assert_eq!(w.step(), WizardStep::Specialty);

        w.select_specialty("cardiologia");
        w.advance(today(), &s).unwrap();
        let err = w.advance(today(), &s).unwrap_err();
        assert_eq!(err.get("doctor"), Some("Selecione um médico"));

        // A doctor from another specialty does not count
        w.select_doctor("d2");
        assert!(w.advance(today(), &s).is_err());

        w.select_doctor("d1");
        w.advance(today(), &s).unwrap();
        let err = w.advance(today(), &s).unwrap_err();
        assert_eq!(err.get("date"), Some("Selecione uma data"));
        assert_eq!(err.get("time"), Some("Selecione um horário"));
    }

    #[test]
    fn test_date_rules() {
        let mut w = wizard();
        let s = schedule();
        w.select_specialty("cardiologia");
        w.advance(today(), &s).unwrap();
        w.select_doctor("d1");
        w.advance(today(), &s).unwrap();

        w.select_date(NaiveDate::from_ymd_opt(2025, 4, 8).unwrap());
        w.select_time("08:00");
        let err = w.advance(today(), &s).unwrap_err();
        assert_eq!(err.get("date"), Some("Data não pode estar no passado"));

        w.select_date(NaiveDate::from_ymd_opt(2025, 4, 11).unwrap());
        w.select_time("08:00");
        let err = w.advance(today(), &s).unwrap_err();
        assert_eq!(err.get("date"), Some("Nenhum horário disponível nesta data"));

        w.select_date(NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
        w.select_time("17:00");
        let err = w.advance(today(), &s).unwrap_err();
        assert_eq!(err.get("time"), Some("Horário indisponível"));
    }

    #[test]
    fn test_changes_clear_dependents() {
        let mut w = wizard();
        w.select_specialty("cardiologia");
        w.select_doctor("d1");
        w.select_specialty("cardiologia");
        assert_eq!(w.doctor_id(), Some("d1"));
        w.select_specialty("ortopedia");
        assert_eq!(w.doctor_id(), None);

        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        w.select_date(date);
        w.select_time("08:00");
        w.select_date(date);
        assert_eq!(w.time(), Some("08:00"));
        w.select_date(date.succ_opt().unwrap());
        assert_eq!(w.time(), None);
    }

    #[test]
    fn test_back_and_early_submit() {
        let mut w = wizard();
        assert_eq!(w.back(), WizardStep::Specialty);
        assert!(w.submit("p1").is_err());

        w.select_specialty("cardiologia");
        w.advance(today(), &schedule()).unwrap();
        assert_eq!(w.back(), WizardStep::Specialty);
        assert_eq!(w.specialty(), Some("cardiologia"));
        assert!(w.summary().is_none());
    }

    #[test]
    fn test_notes_kept_when_returning_to_date_step() {
        let mut w = wizard();
        let s = schedule();
        w.select_specialty("cardiologia");
        w.advance(today(), &s).unwrap();
        w.select_doctor("d1");
        w.advance(today(), &s).unwrap();
        w.select_date(NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
        w.select_time("08:00");
        w.set_notes(" Primeira consulta ");
        w.advance(today(), &s).unwrap();

        assert_eq!(w.back(), WizardStep::DateTime);
        assert_eq!(w.notes(), Some("Primeira consulta"));
        // Editing the date step leaves the chosen doctor alone
        assert_eq!(w.doctor_id(), Some("d1"));

        w.set_notes("   ");
        assert_eq!(w.notes(), None);
    }
}
