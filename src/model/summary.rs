use serde::{Deserialize, Serialize};

/// Headline counts shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_appointments: u64,
    pub today_appointments: u64,
    /// Today or later, still scheduled or confirmed
    pub upcoming_appointments: u64,
    pub completed_appointments: u64,
    pub cancelled_appointments: u64,
    pub total_doctors: u64,
    pub total_patients: u64,
}
