use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;

use crate::{
    AppState,
    error::AppError,
    routes::{campaign::model::Campaign, donor::model::Donor},
    stats::{blood_collected, success_rate},
};

use super::model::DashboardSummary;

const RECENT_DONATIONS_LIMIT: i64 = 5;

/// Dashboard aggregates: donor counts, campaigns still running, derived
/// rates and the latest donations.
#[axum::debug_handler]
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let total_donors = Donor::count(&state.pool).await?;
    let eligible_donors = Donor::count_eligible(&state.pool).await?;
    let active_campaigns = Campaign::count_active(&state.pool, Utc::now()).await?;
    let recent_donations = Donor::list_recent(&state.pool, RECENT_DONATIONS_LIMIT).await?;

    Ok(Json(DashboardSummary {
        total_donors,
        eligible_donors,
        active_campaigns,
        success_rate: success_rate(total_donors, eligible_donors),
        blood_collected: blood_collected(eligible_donors),
        recent_donations,
    }))
}
