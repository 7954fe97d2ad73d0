//! UI Components
//!
//! Reusable Leptos components shared by the admin and mobile pages.

pub mod confirm_dialog;
pub mod field;
pub mod loading;
pub mod nav;
pub mod status_badge;
pub mod toast;

pub use confirm_dialog::ConfirmDialog;
pub use field::{field_error, SelectField, TextField};
pub use loading::{ListSkeleton, Loading};
pub use nav::{MobileNav, Nav};
pub use status_badge::StatusBadge;
pub use toast::Toast;
