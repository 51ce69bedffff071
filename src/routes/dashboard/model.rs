use serde::Serialize;

use crate::routes::donor::model::Donor;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_donors: i64,
    pub eligible_donors: i64,
    pub active_campaigns: i64,
    /// Percentage of eligible donors, one decimal.
    pub success_rate: f64,
    /// Estimated litres collected, one decimal.
    pub blood_collected: f64,
    pub recent_donations: Vec<Donor>,
}
