//! Data Transfer Objects
//!
//! Request and response types for the API. Entity bodies reuse the
//! domain model and form types directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clinic::AppointmentFilter;
use crate::forms::AppointmentInput;
use crate::model::{Appointment, AppointmentStatus};
use crate::routing::DeviceClass;

// ============================================================================
// Lists
// ============================================================================

/// Any list endpoint's response
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Free-text search over a list
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Doctor listing filters
#[derive(Debug, Default, Deserialize)]
pub struct DoctorListQuery {
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

/// Appointment listing filters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    /// Matched against patient, doctor and specialty names
    #[serde(default)]
    pub q: Option<String>,
}

impl AppointmentListQuery {
    pub fn filter(&self) -> AppointmentFilter {
        AppointmentFilter {
            date: self.date,
            from: self.from,
            to: self.to,
            status: self.status,
            doctor_id: self.doctor_id.clone(),
            patient_id: self.patient_id.clone(),
        }
    }
}

// ============================================================================
// Appointments
// ============================================================================

/// Explicit status change
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: AppointmentStatus,
}

/// Wizard booking body; the booking always starts out scheduled
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<BookSlotRequest> for AppointmentInput {
    fn from(request: BookSlotRequest) -> Self {
        AppointmentInput {
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Scheduled,
            notes: request.notes,
        }
    }
}

// ============================================================================
// Schedule & Calendar
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    /// First date; defaults to today
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub days: Option<u32>,
}

/// One bookable date
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub times: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub doctor_id: String,
    pub days: Vec<ScheduleDay>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub busy_days: Vec<NaiveDate>,
    pub appointments: Vec<Appointment>,
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SpecialtyDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesResponse {
    /// Desktop booking slots
    pub available: Vec<String>,
    /// Fallback slots for doctors without availability windows
    pub mobile_default: Vec<String>,
}

// ============================================================================
// Routing
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub path: String,
    /// Viewport width in CSS pixels; the User-Agent is used without it
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteDecision {
    pub device: DeviceClass,
    pub redirect: Option<String>,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub data_service: DataServiceHealth,
}

#[derive(Debug, Serialize)]
pub struct DataServiceHealth {
    pub backend: String,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
