//! Profile Routes

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::forms::ProfileForm;
use crate::model::Profile;

/// GET /api/v1/profiles/:id
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.clinic.get_profile(&id).await?))
}

/// PUT /api/v1/profiles/:id
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(form): ApiJson<ProfileForm>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.clinic.update_profile(&id, &form).await?))
}
