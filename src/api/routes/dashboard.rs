//! Dashboard Routes
//!
//! Headline counts, today's agenda and the month calendar.

use axum::{
    extract::State,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CalendarQuery, CalendarResponse, ListResponse};
use crate::api::error::ApiResult;
use crate::api::extract::ApiQuery;
use crate::api::state::AppState;
use crate::dashboard;
use crate::model::{Appointment, DashboardSummary};

/// GET /api/v1/dashboard/summary
pub async fn summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardSummary>> {
    Ok(Json(state.clinic.dashboard_summary(state.today()).await?))
}

/// GET /api/v1/dashboard/today
pub async fn today(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListResponse<Appointment>>> {
    let appointments = state.clinic.todays_appointments(state.today()).await?;
    Ok(Json(ListResponse::new(appointments)))
}

/// GET /api/v1/calendar?year=&month=
pub async fn calendar(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<CalendarQuery>,
) -> ApiResult<Json<CalendarResponse>> {
    let appointments = state
        .clinic
        .month_appointments(params.year, params.month)
        .await?;
    let busy_days = dashboard::busy_days(&appointments, params.year, params.month)
        .into_iter()
        .collect();

    Ok(Json(CalendarResponse {
        year: params.year,
        month: params.month,
        busy_days,
        appointments,
    }))
}
