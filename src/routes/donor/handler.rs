use axum::{
    Json,
    extract::{Form, Path, State},
    response::IntoResponse,
};

use crate::{AppState, error::AppError, routes::campaign::model::Campaign};

use super::model::{CreateDonorRequest, Donor, SubmitDonorResponse};

/// Donor entry form data for one campaign, or 404.
#[axum::debug_handler]
pub async fn donor_form(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let campaign = Campaign::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(campaign))
}

#[axum::debug_handler]
pub async fn submit_donor(
    State(state): State<AppState>,
    Form(req): Form<CreateDonorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_donor = req.parse()?;
    let donor = Donor::create(&state.pool, new_donor).await?;

    tracing::info!(
        "registered donor {} for campaign {}",
        donor.unique_code,
        donor.campaign_id
    );

    Ok(Json(SubmitDonorResponse {
        success: true,
        donor_code: donor.unique_code,
    }))
}
