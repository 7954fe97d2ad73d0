//! MedAppt REST API
//!
//! HTTP API layer over the clinic data, built with Axum.
//!
//! # Endpoints
//!
//! ## Doctors
//! - `GET /api/v1/doctors` - List doctors (`?specialty=`, `?q=`)
//! - `POST /api/v1/doctors` - Create a doctor
//! - `GET|PUT|DELETE /api/v1/doctors/:id`
//! - `GET|POST /api/v1/doctors/:id/availability` - Weekly windows
//! - `GET /api/v1/doctors/:id/schedule` - Free slots per date
//! - `DELETE /api/v1/availability/:id`
//!
//! ## Patients & Records
//! - `GET|POST /api/v1/patients`
//! - `GET|PUT|DELETE /api/v1/patients/:id`
//! - `GET /api/v1/patients/:id/records`
//! - `POST /api/v1/records`, `DELETE /api/v1/records/:id`
//!
//! ## Appointments
//! - `GET /api/v1/appointments` - Filtered listing
//! - `POST /api/v1/appointments` - Desktop booking form
//! - `POST /api/v1/appointments/book` - Wizard booking
//! - `GET|DELETE /api/v1/appointments/:id`
//! - `PUT /api/v1/appointments/:id/status`
//! - `POST /api/v1/appointments/:id/{confirm,cancel,complete}`
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard/summary`, `GET /api/v1/dashboard/today`
//! - `GET /api/v1/calendar?year=&month=`
//!
//! ## Misc
//! - `GET /api/v1/specialties`, `GET /api/v1/times`
//! - `GET|PUT /api/v1/profiles/:id`
//! - `GET /api/v1/route?path=&width=` - Device redirect decision
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe (pings the data service)
//! - `GET /health` - Full health status

pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use crate::config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// CORS from the configured origins; permissive when none are listed
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use routes::{
        appointments, catalog, dashboard, doctors, health, patients, profiles, records, routing,
    };

    let api_routes = Router::new()
        // Doctors
        .route("/doctors", get(doctors::list_doctors).post(doctors::create_doctor))
        .route(
            "/doctors/:id",
            get(doctors::get_doctor)
                .put(doctors::update_doctor)
                .delete(doctors::delete_doctor),
        )
        .route(
            "/doctors/:id/availability",
            get(doctors::list_availability).post(doctors::add_availability),
        )
        .route("/doctors/:id/schedule", get(doctors::schedule))
        .route("/availability/:id", delete(doctors::delete_availability))
        // Patients
        .route("/patients", get(patients::list_patients).post(patients::create_patient))
        .route(
            "/patients/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route("/patients/:id/records", get(patients::list_records))
        // Medical records
        .route("/records", post(records::create_record))
        .route("/records/:id", delete(records::delete_record))
        // Appointments
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/appointments/book", post(appointments::book_slot))
        .route(
            "/appointments/:id",
            get(appointments::get_appointment).delete(appointments::delete_appointment),
        )
        .route("/appointments/:id/status", put(appointments::set_status))
        .route("/appointments/:id/confirm", post(appointments::confirm))
        .route("/appointments/:id/cancel", post(appointments::cancel))
        .route("/appointments/:id/complete", post(appointments::complete))
        // Dashboard
        .route("/dashboard/summary", get(dashboard::summary))
        .route("/dashboard/today", get(dashboard::today))
        .route("/calendar", get(dashboard::calendar))
        // Catalog
        .route("/specialties", get(catalog::specialties))
        .route("/times", get(catalog::times))
        // Profiles
        .route(
            "/profiles/:id",
            get(profiles::get_profile).put(profiles::update_profile),
        )
        // Device routing
        .route("/route", get(routing::decide));

    let health_routes = Router::new()
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .route("/", get(health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state
        .config
        .addr()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let backend = state.store().backend();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, backend, "MedAppt API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("MedAppt API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic::testing::today;
    use crate::datastore::MemoryStore;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = Arc::new(MemoryStore::with_demo_data(today()));
        let state = AppState::new(store, ApiConfig::default()).with_today(today());
        build_router(state)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = send(create_test_app(), "GET", "/health/live", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = send(create_test_app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["data_service"]["backend"], "memory");
    }

    #[tokio::test]
    async fn test_list_doctors_by_specialty() {
        let (status, body) = send(
            create_test_app(),
            "GET",
            "/api/v1/doctors?specialty=cardiologia",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["id"], "doc-maria");
    }

    #[tokio::test]
    async fn test_search_patients() {
        let (_, body) = send(create_test_app(), "GET", "/api/v1/patients?q=FERN", None).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["id"], "pat-fernanda");
    }

    #[tokio::test]
    async fn test_create_patient_validation() {
        let (status, body) = send(
            create_test_app(),
            "POST",
            "/api/v1/patients",
            Some(r#"{"name": "Jo", "email": "x", "cpf": "1234567890"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"]["cpf"], "CPF deve ter 11 dígitos");
        assert!(body["error"]["fields"]["name"].is_string());
    }

    #[tokio::test]
    async fn test_create_patient() {
        let (status, body) = send(
            create_test_app(),
            "POST",
            "/api/v1/patients",
            Some(r#"{"name": "Lúcia Prado", "email": "lucia@email.com", "cpf": "98765432100"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["cpf"], "98765432100");
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (status, body) = send(create_test_app(), "POST", "/api/v1/doctors", Some("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_query() {
        let (status, body) = send(
            create_test_app(),
            "GET",
            "/api/v1/appointments?status=pending",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let (status, body) = send(
            create_test_app(),
            "GET",
            "/api/v1/doctors/doc-maria/schedule?from=10/04/2025",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_schedule_past_end_of_calendar() {
        let (status, body) = send(
            create_test_app(),
            "GET",
            "/api/v1/doctors/doc-maria/schedule?from=%2B262142-12-31&days=2",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["fields"]["from"], "Data inválida");
    }

    #[tokio::test]
    async fn test_appointments_filtered_by_status() {
        let (status, body) = send(
            create_test_app(),
            "GET",
            "/api/v1/appointments?status=scheduled",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["items"][0]["patientName"], "Ricardo Alves");
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let app = create_test_app();
        let (status, body) =
            send(app.clone(), "POST", "/api/v1/appointments/apt-4/confirm", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "confirmed");

        let (status, body) =
            send(app.clone(), "POST", "/api/v1/appointments/apt-2/confirm", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "INVALID_TRANSITION");

        let (status, _) = send(app, "POST", "/api/v1/appointments/nope/cancel", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_book_weekend_rejected() {
        // 2025-04-12 is a Saturday
        let (status, body) = send(
            create_test_app(),
            "POST",
            "/api/v1/appointments",
            Some(
                r#"{"specialty": "cardiologia", "doctorId": "doc-maria", "date": "2025-04-12",
                    "time": "09:00", "patientId": "pat-joao"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["error"]["fields"]["date"],
            "Não há atendimento aos finais de semana"
        );
    }

    #[tokio::test]
    async fn test_wizard_booking_takes_slot() {
        let app = create_test_app();
        let payload = r#"{"patientId": "pat-ricardo", "doctorId": "doc-maria",
            "date": "2025-04-10", "time": "08:30"}"#;

        let (status, _) = send(app.clone(), "POST", "/api/v1/appointments/book", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(app.clone(), "POST", "/api/v1/appointments/book", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["fields"]["time"], "Horário indisponível");

        let (_, body) = send(
            app,
            "GET",
            "/api/v1/doctors/doc-maria/schedule?from=2025-04-10&days=1",
            None,
        )
        .await;
        let times = body["days"][0]["times"].as_array().unwrap();
        assert!(!times.iter().any(|t| t == "08:30"));
    }

    #[tokio::test]
    async fn test_dashboard_summary() {
        let (status, body) = send(create_test_app(), "GET", "/api/v1/dashboard/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalAppointments"], 6);
        assert_eq!(body["todayAppointments"], 2);
        assert_eq!(body["totalDoctors"], 4);
    }

    #[tokio::test]
    async fn test_calendar() {
        let app = create_test_app();
        let (status, body) = send(app.clone(), "GET", "/api/v1/calendar?year=2025&month=4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appointments"].as_array().unwrap().len(), 6);
        // two appointments share today
        assert_eq!(body["busyDays"].as_array().unwrap().len(), 5);

        let (status, _) = send(app, "GET", "/api/v1/calendar?year=2025&month=13", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_specialties() {
        let (_, body) = send(create_test_app(), "GET", "/api/v1/specialties", None).await;
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s["id"] == "cardiologia"));
    }

    #[tokio::test]
    async fn test_profile() {
        let (status, body) = send(create_test_app(), "GET", "/api/v1/profiles/usr-maria", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "doctor");
        assert_eq!(body["linkedId"], "doc-maria");
    }

    #[tokio::test]
    async fn test_route_decision() {
        let (_, body) = send(
            create_test_app(),
            "GET",
            "/api/v1/route?path=/doctors&width=375",
            None,
        )
        .await;
        assert_eq!(body["device"], "mobile");
        assert_eq!(body["redirect"], "/mobile");

        let request = Request::builder()
            .uri("/api/v1/route?path=/mobile/profile")
            .header("User-Agent", "Mozilla/5.0 (X11; Linux x86_64)")
            .body(Body::empty())
            .unwrap();
        let response = create_test_app().oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["device"], "desktop");
        assert_eq!(body["redirect"], "/dashboard");
    }

    #[tokio::test]
    async fn test_delete_missing_record() {
        let (status, _) = send(create_test_app(), "DELETE", "/api/v1/records/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(create_test_app(), "DELETE", "/api/v1/records/rec-1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
