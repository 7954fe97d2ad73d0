//! Catalog Routes
//!
//! Static reference data: specialties and bookable times.

use axum::Json;

use crate::api::dto::{SpecialtyDto, TimesResponse};
use crate::catalog::{AVAILABLE_TIMES, DEFAULT_MOBILE_TIMES, SPECIALTIES};

/// GET /api/v1/specialties
pub async fn specialties() -> Json<Vec<SpecialtyDto>> {
    Json(
        SPECIALTIES
            .iter()
            .map(|s| SpecialtyDto {
                id: s.id.to_string(),
                name: s.name.to_string(),
            })
            .collect(),
    )
}

/// GET /api/v1/times
pub async fn times() -> Json<TimesResponse> {
    let owned = |times: &[&str]| times.iter().map(|t| t.to_string()).collect();
    Json(TimesResponse {
        available: owned(AVAILABLE_TIMES),
        mobile_default: owned(DEFAULT_MOBILE_TIMES),
    })
}
