use axum::{
    Json,
    extract::{Form, Path, State},
    http::header,
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    export::{csv::donors_to_csv, pdf::{campaign_report_pdf, report_file_name}},
    routes::donor::model::Donor,
    stats::compute_campaign_stats,
};

use super::model::{Campaign, CreateCampaignRequest, CreateCampaignResponse};

/// Campaign list page data, newest first.
#[axum::debug_handler]
pub async fn campaigns(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let campaigns = Campaign::list(&state.pool).await?;
    Ok(Json(campaigns))
}

#[axum::debug_handler]
pub async fn create_campaign(
    State(state): State<AppState>,
    Form(req): Form<CreateCampaignRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_campaign = req.parse()?;
    let campaign = Campaign::create(&state.pool, new_campaign).await?;

    tracing::info!("created campaign {} ({})", campaign.id, campaign.name);

    Ok(Json(CreateCampaignResponse {
        success: true,
        campaign_id: campaign.id,
    }))
}

#[axum::debug_handler]
pub async fn campaign_stats(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Campaign::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let donors = Donor::list_for_campaign(&state.pool, campaign_id).await?;
    Ok(Json(compute_campaign_stats(&donors)))
}

#[axum::debug_handler]
pub async fn export_csv(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Campaign::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let donors = Donor::list_for_campaign(&state.pool, campaign_id).await?;
    let body = donors_to_csv(&donors)?;

    Ok(([(header::CONTENT_TYPE, "text/csv")], body))
}

#[axum::debug_handler]
pub async fn export_pdf(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let campaign = Campaign::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let donors = Donor::list_for_campaign(&state.pool, campaign_id).await?;
    let body = campaign_report_pdf(&campaign, &donors)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report_file_name(campaign.id)),
            ),
        ],
        body,
    ))
}
