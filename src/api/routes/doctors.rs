//! Doctor Routes
//!
//! CRUD over the doctors table plus their weekly availability windows and
//! bookable schedule.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{DoctorListQuery, ListResponse, ScheduleDay, ScheduleQuery, ScheduleResponse};
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::state::AppState;
use crate::forms::{AvailabilityForm, DoctorForm};
use crate::model::{Availability, Doctor};
use crate::search;

/// GET /api/v1/doctors?specialty=&q=
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DoctorListQuery>,
) -> ApiResult<Json<ListResponse<Doctor>>> {
    let doctors = match params.specialty.as_deref().filter(|s| !s.is_empty()) {
        Some(specialty) => state.clinic.list_doctors_by_specialty(specialty).await?,
        None => state.clinic.list_doctors().await?,
    };

    let doctors = match params.q.as_deref() {
        Some(term) => search::search(&doctors, term).into_iter().cloned().collect(),
        None => doctors,
    };

    Ok(Json(ListResponse::new(doctors)))
}

/// GET /api/v1/doctors/:id
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Doctor>> {
    Ok(Json(state.clinic.get_doctor(&id).await?))
}

/// POST /api/v1/doctors
pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    ApiJson(form): ApiJson<DoctorForm>,
) -> ApiResult<(StatusCode, Json<Doctor>)> {
    let doctor = state.clinic.create_doctor(&form).await?;
    Ok((StatusCode::CREATED, Json(doctor)))
}

/// PUT /api/v1/doctors/:id
pub async fn update_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(form): ApiJson<DoctorForm>,
) -> ApiResult<Json<Doctor>> {
    Ok(Json(state.clinic.update_doctor(&id, &form).await?))
}

/// DELETE /api/v1/doctors/:id
pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.clinic.delete_doctor(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/doctors/:id/availability
pub async fn list_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ListResponse<Availability>>> {
    let windows = state.clinic.list_availability(&id).await?;
    Ok(Json(ListResponse::new(windows)))
}

/// POST /api/v1/doctors/:id/availability
///
/// The path's doctor id wins over one in the body.
pub async fn add_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(form): ApiJson<AvailabilityForm>,
) -> ApiResult<(StatusCode, Json<Availability>)> {
    let form = AvailabilityForm {
        doctor_id: id,
        ..form
    };
    let window = state.clinic.add_availability(&form).await?;
    Ok((StatusCode::CREATED, Json(window)))
}

/// DELETE /api/v1/availability/:id
pub async fn delete_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.clinic.delete_availability(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/doctors/:id/schedule?from=&days=
pub async fn schedule(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<ScheduleQuery>,
) -> ApiResult<Json<ScheduleResponse>> {
    let from = params.from.unwrap_or_else(|| state.today());
    let days = params.days.unwrap_or(14);

    let schedule = state.clinic.schedule(&id, from, days).await?;
    let days = schedule
        .into_iter()
        .map(|(date, times)| ScheduleDay { date, times })
        .collect();

    Ok(Json(ScheduleResponse { doctor_id: id, days }))
}
