//! MedAppt Connect
//!
//! Clinic management front end built with Leptos (WASM).
//!
//! # Features
//!
//! - Admin screens for doctors, patients and appointments
//! - Dashboard with headline counts and a month calendar
//! - Mobile screens with a step-by-step booking wizard
//! - Automatic mobile/desktop redirects by viewport width
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application compiled to
//! WebAssembly. It talks to the MedAppt API over HTTP and shares the
//! `medappt` crate's model, form validation and wizard logic.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
