//! API Access
//!
//! HTTP calls to the MedAppt REST API.

mod client;

pub use client::*;
