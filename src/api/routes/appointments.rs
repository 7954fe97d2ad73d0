//! Appointment Routes
//!
//! Listing, booking (desktop form and wizard slot) and status changes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{AppointmentListQuery, BookSlotRequest, ListResponse, StatusRequest};
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::state::AppState;
use crate::forms::AppointmentForm;
use crate::model::Appointment;
use crate::search;

/// GET /api/v1/appointments?date=&from=&to=&status=&doctorId=&patientId=&q=
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<AppointmentListQuery>,
) -> ApiResult<Json<ListResponse<Appointment>>> {
    let appointments = state.clinic.list_appointments(&params.filter()).await?;
    let appointments = match params.q.as_deref() {
        Some(term) => search::filter_appointments(&appointments, term, None)
            .into_iter()
            .cloned()
            .collect(),
        None => appointments,
    };
    Ok(Json(ListResponse::new(appointments)))
}

/// GET /api/v1/appointments/:id
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Appointment>> {
    Ok(Json(state.clinic.get_appointment(&id).await?))
}

/// POST /api/v1/appointments
///
/// Desktop booking form.
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    ApiJson(form): ApiJson<AppointmentForm>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let appointment = state.clinic.book_appointment(&form, state.today()).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// POST /api/v1/appointments/book
///
/// Wizard booking; the slot must still be free.
pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<BookSlotRequest>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let input = request.into();
    let appointment = state.clinic.book_slot(&input, state.today()).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// PUT /api/v1/appointments/:id/status
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<StatusRequest>,
) -> ApiResult<Json<Appointment>> {
    Ok(Json(state.clinic.set_status(&id, request.status).await?))
}

/// POST /api/v1/appointments/:id/confirm
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Appointment>> {
    Ok(Json(state.clinic.confirm_appointment(&id).await?))
}

/// POST /api/v1/appointments/:id/cancel
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Appointment>> {
    Ok(Json(state.clinic.cancel_appointment(&id).await?))
}

/// POST /api/v1/appointments/:id/complete
pub async fn complete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Appointment>> {
    Ok(Json(state.clinic.complete_appointment(&id).await?))
}

/// DELETE /api/v1/appointments/:id
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.clinic.delete_appointment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
