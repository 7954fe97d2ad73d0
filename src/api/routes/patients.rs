//! Patient Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ListResponse, SearchQuery};
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::state::AppState;
use crate::forms::PatientForm;
use crate::model::{MedicalRecord, Patient};
use crate::search;

/// GET /api/v1/patients?q=
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SearchQuery>,
) -> ApiResult<Json<ListResponse<Patient>>> {
    let patients = state.clinic.list_patients().await?;
    let patients = match params.q.as_deref() {
        Some(term) => search::search(&patients, term).into_iter().cloned().collect(),
        None => patients,
    };
    Ok(Json(ListResponse::new(patients)))
}

/// GET /api/v1/patients/:id
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Patient>> {
    Ok(Json(state.clinic.get_patient(&id).await?))
}

/// POST /api/v1/patients
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    ApiJson(form): ApiJson<PatientForm>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    let patient = state.clinic.create_patient(&form).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// PUT /api/v1/patients/:id
pub async fn update_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(form): ApiJson<PatientForm>,
) -> ApiResult<Json<Patient>> {
    Ok(Json(state.clinic.update_patient(&id, &form).await?))
}

/// DELETE /api/v1/patients/:id
pub async fn delete_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.clinic.delete_patient(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/patients/:id/records
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ListResponse<MedicalRecord>>> {
    let records = state.clinic.list_records(&id).await?;
    Ok(Json(ListResponse::new(records)))
}
