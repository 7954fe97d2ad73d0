//! Pages
//!
//! Top-level page components for each route.

pub mod appointments;
pub mod dashboard;
pub mod doctors;
pub mod landing;
pub mod mobile;
pub mod patients;
pub mod profile;

pub use appointments::Appointments;
pub use dashboard::Dashboard;
pub use doctors::Doctors;
pub use landing::Landing;
pub use patients::Patients;
pub use profile::Profile;
