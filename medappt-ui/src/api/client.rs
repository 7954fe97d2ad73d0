//! HTTP API Client
//!
//! Functions for communicating with the MedAppt REST API. Every call
//! resolves to a user-facing message on failure.

use chrono::NaiveDate;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use medappt::forms::{
    AppointmentForm, AppointmentInput, DoctorForm, MedicalRecordForm, PatientForm, ProfileForm,
};
use medappt::model::{
    Appointment, AppointmentStatus, DashboardSummary, Doctor, MedicalRecord, Patient, Profile,
};
use medappt::wizard::Schedule;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1";

const API_URL_KEY: &str = "medappt_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ScheduleDay {
    date: NaiveDate,
    times: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    days: Vec<ScheduleDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub busy_days: Vec<NaiveDate>,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    fields: Option<std::collections::BTreeMap<String, String>>,
}

#[derive(Serialize)]
struct StatusRequest {
    status: AppointmentStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookSlotBody<'a> {
    patient_id: &'a str,
    doctor_id: &'a str,
    date: NaiveDate,
    time: &'a str,
    notes: Option<&'a str>,
}

// ============ Plumbing ============

/// Turn a non-2xx response into its most useful message
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => match envelope.error.fields {
            // Field messages are already in the user's language
            Some(fields) if !fields.is_empty() => {
                fields.into_values().collect::<Vec<_>>().join(" ")
            }
            _ => envelope.error.message,
        },
        Err(_) => format!("Erro inesperado ({})", status),
    }
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        return Err(error_message(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn read_empty(response: Response) -> Result<(), String> {
    if !response.ok() {
        return Err(error_message(response).await);
    }
    Ok(())
}

async fn get<T: DeserializeOwned>(path: &str, query: &[(&str, String)]) -> Result<T, String> {
    let url = format!("{}{}", get_api_base(), path);
    let response = Request::get(&url)
        .query(query.iter().map(|(k, v)| (*k, v.as_str())))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    read(response).await
}

async fn list<T: DeserializeOwned>(path: &str, query: &[(&str, String)]) -> Result<Vec<T>, String> {
    let list: ListResponse<T> = get(path, query).await?;
    Ok(list.items)
}

async fn send_json<B: Serialize, T: DeserializeOwned>(
    method: &str,
    path: &str,
    body: &B,
) -> Result<T, String> {
    let url = format!("{}{}", get_api_base(), path);
    let request = match method {
        "PUT" => Request::put(&url),
        _ => Request::post(&url),
    };
    let response = request
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    read(response).await
}

async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::post(&format!("{}{}", get_api_base(), path))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    read(response).await
}

async fn delete(path: &str) -> Result<(), String> {
    let response = Request::delete(&format!("{}{}", get_api_base(), path))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    read_empty(response).await
}

// ============ Doctors ============

pub async fn fetch_doctors() -> Result<Vec<Doctor>, String> {
    list("/doctors", &[]).await
}

pub async fn fetch_doctors_by_specialty(specialty: &str) -> Result<Vec<Doctor>, String> {
    list("/doctors", &[("specialty", specialty.to_string())]).await
}

pub async fn create_doctor(form: &DoctorForm) -> Result<Doctor, String> {
    send_json("POST", "/doctors", form).await
}

pub async fn update_doctor(id: &str, form: &DoctorForm) -> Result<Doctor, String> {
    send_json("PUT", &format!("/doctors/{}", id), form).await
}

pub async fn delete_doctor(id: &str) -> Result<(), String> {
    delete(&format!("/doctors/{}", id)).await
}

/// Free slots for the next `days` days
pub async fn fetch_schedule(doctor_id: &str, days: u32) -> Result<Schedule, String> {
    let response: ScheduleResponse = get(
        &format!("/doctors/{}/schedule", doctor_id),
        &[("days", days.to_string())],
    )
    .await?;
    Ok(response
        .days
        .into_iter()
        .map(|day| (day.date, day.times))
        .collect())
}

// ============ Patients ============

pub async fn fetch_patients() -> Result<Vec<Patient>, String> {
    list("/patients", &[]).await
}

pub async fn create_patient(form: &PatientForm) -> Result<Patient, String> {
    send_json("POST", "/patients", form).await
}

pub async fn update_patient(id: &str, form: &PatientForm) -> Result<Patient, String> {
    send_json("PUT", &format!("/patients/{}", id), form).await
}

pub async fn delete_patient(id: &str) -> Result<(), String> {
    delete(&format!("/patients/{}", id)).await
}

pub async fn fetch_records(patient_id: &str) -> Result<Vec<MedicalRecord>, String> {
    list(&format!("/patients/{}/records", patient_id), &[]).await
}

pub async fn create_record(form: &MedicalRecordForm) -> Result<MedicalRecord, String> {
    send_json("POST", "/records", form).await
}

// ============ Appointments ============

pub async fn fetch_appointments() -> Result<Vec<Appointment>, String> {
    list("/appointments", &[]).await
}

pub async fn fetch_patient_appointments(patient_id: &str) -> Result<Vec<Appointment>, String> {
    list("/appointments", &[("patientId", patient_id.to_string())]).await
}

pub async fn create_appointment(form: &AppointmentForm) -> Result<Appointment, String> {
    send_json("POST", "/appointments", form).await
}

/// Wizard booking
pub async fn book_slot(input: &AppointmentInput) -> Result<Appointment, String> {
    let body = BookSlotBody {
        patient_id: &input.patient_id,
        doctor_id: &input.doctor_id,
        date: input.date,
        time: &input.time,
        notes: input.notes.as_deref(),
    };
    send_json("POST", "/appointments/book", &body).await
}

pub async fn set_status(id: &str, status: AppointmentStatus) -> Result<Appointment, String> {
    send_json("PUT", &format!("/appointments/{}/status", id), &StatusRequest { status }).await
}

pub async fn cancel_appointment(id: &str) -> Result<Appointment, String> {
    post_empty(&format!("/appointments/{}/cancel", id)).await
}

pub async fn delete_appointment(id: &str) -> Result<(), String> {
    delete(&format!("/appointments/{}", id)).await
}

// ============ Dashboard ============

pub async fn fetch_summary() -> Result<DashboardSummary, String> {
    get("/dashboard/summary", &[]).await
}

pub async fn fetch_today() -> Result<Vec<Appointment>, String> {
    list("/dashboard/today", &[]).await
}

pub async fn fetch_calendar(year: i32, month: u32) -> Result<CalendarMonth, String> {
    get(
        "/calendar",
        &[("year", year.to_string()), ("month", month.to_string())],
    )
    .await
}

// ============ Profiles ============

pub async fn fetch_profile(user_id: &str) -> Result<Profile, String> {
    get(&format!("/profiles/{}", user_id), &[]).await
}

pub async fn update_profile(user_id: &str, form: &ProfileForm) -> Result<Profile, String> {
    send_json("PUT", &format!("/profiles/{}", user_id), form).await
}
