//! Route Decision
//!
//! Lets non-browser clients ask where a path should land for their device.

use axum::{http::header, http::HeaderMap, Json};

use crate::api::dto::{RouteDecision, RouteQuery};
use crate::api::extract::ApiQuery;
use crate::routing::{redirect_for, DeviceClass};

/// GET /api/v1/route?path=&width=
pub async fn decide(headers: HeaderMap, ApiQuery(params): ApiQuery<RouteQuery>) -> Json<RouteDecision> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let device = DeviceClass::detect(params.width, user_agent);

    Json(RouteDecision {
        device,
        redirect: redirect_for(&params.path, device).map(str::to_string),
    })
}
