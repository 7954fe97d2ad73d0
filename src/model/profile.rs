use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role stored in `profiles.role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Doctor => write!(f, "doctor"),
            Role::Patient => write!(f, "patient"),
        }
    }
}

/// `profiles` table row
///
/// `profile_id` points at the matching `doctors` or `patients` row,
/// depending on the role. Admins have none.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(default)]
    pub profile_id: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A signed-in user's profile with the contact data of the linked row
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
