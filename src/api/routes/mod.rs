//! API Routes
//!
//! Route handlers organized by resource.

pub mod appointments;
pub mod catalog;
pub mod dashboard;
pub mod doctors;
pub mod health;
pub mod patients;
pub mod profiles;
pub mod records;
pub mod routing;
