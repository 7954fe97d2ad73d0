//! Medical Record Routes
//!
//! Listing lives under the patient (`/patients/:id/records`).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::forms::MedicalRecordForm;
use crate::model::MedicalRecord;

/// POST /api/v1/records
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    ApiJson(form): ApiJson<MedicalRecordForm>,
) -> ApiResult<(StatusCode, Json<MedicalRecord>)> {
    let record = state.clinic.create_record(&form).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/v1/records/:id
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.clinic.delete_record(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
