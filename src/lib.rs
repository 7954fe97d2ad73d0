//! # MedAppt
//!
//! Clinic management for patients, doctors and appointments, backed by a
//! hosted table service (PostgREST dialect).
//!
//! ## Modules
//!
//! Shared with the browser front end (always compiled):
//!
//! - [`model`]: Entities and their table-row shapes
//! - [`forms`]: Form state and validation with per-field messages
//! - [`search`]: Case-insensitive list filtering
//! - [`catalog`]: Specialties and bookable time slots
//! - [`wizard`]: The four-step mobile booking flow
//! - [`routing`]: Mobile/desktop redirect rules
//! - [`dashboard`]: Calendar helpers (and, with `server`, headline counts)
//!
//! Native only (`server` feature):
//!
//! - [`datastore`]: Table access over HTTP, or in memory
//! - [`clinic`]: Typed clinic operations over a [`datastore::TableStore`]
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medappt::clinic::Clinic;
//! use medappt::config::Config;
//! use medappt::datastore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let store = datastore::connect(&config.data_service)?;
//!     let clinic = Clinic::new(store);
//!
//!     let today = chrono::Local::now().date_naive();
//!     let summary = clinic.dashboard_summary(today).await?;
//!     println!("{} appointments today", summary.today_appointments);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod dashboard;
pub mod forms;
pub mod model;
pub mod routing;
pub mod search;
pub mod wizard;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod clinic;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod datastore;

// Re-export top-level types for convenience
pub use forms::ValidationErrors;
pub use model::{
    Appointment, AppointmentStatus, Availability, DashboardSummary, Doctor, MedicalRecord,
    Patient, Profile, Role,
};
pub use wizard::{BookingWizard, WizardStep};

#[cfg(feature = "server")]
pub use api::{build_router, serve, ApiError, AppState};
#[cfg(feature = "server")]
pub use clinic::{Clinic, ClinicError};
#[cfg(feature = "server")]
pub use config::{Config, ConfigError};
#[cfg(feature = "server")]
pub use datastore::{DataStoreError, TableStore};
