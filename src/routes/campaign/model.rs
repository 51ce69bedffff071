use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub target_goal: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Raw form payload. Dates and the goal arrive as text and are parsed
/// explicitly so a malformed field reports a validation error instead of a
/// framework rejection.
#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub target_goal: String,
}

#[derive(Debug)]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub target_goal: i32,
}

#[derive(Debug, Serialize)]
pub struct CreateCampaignResponse {
    pub success: bool,
    pub campaign_id: i64,
}

/// Parse a `YYYY-MM-DD` date into a UTC timestamp at midnight.
pub fn parse_campaign_date(input: &str) -> Result<DateTime<Utc>, AppError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| AppError::Validation(format!("invalid date '{}': {}", input, e)))
}

impl CreateCampaignRequest {
    pub fn parse(self) -> Result<NewCampaign, AppError> {
        let start_date = parse_campaign_date(&self.start_date)?;
        let end_date = parse_campaign_date(&self.end_date)?;
        let target_goal = self
            .target_goal
            .trim()
            .parse::<i32>()
            .map_err(|e| AppError::Validation(format!("invalid target_goal: {}", e)))?;

        Ok(NewCampaign {
            name: self.name,
            description: self.description,
            start_date,
            end_date,
            location: self.location,
            target_goal,
        })
    }
}

impl Campaign {
    pub async fn create(pool: &PgPool, campaign: NewCampaign) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            r#"
            INSERT INTO campaigns (name, description, start_date, end_date, location, target_goal)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, start_date, end_date, location,
                      target_goal, status, created_at
            "#,
        )
        .bind(&campaign.name)
        .bind(&campaign.description)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(&campaign.location)
        .bind(campaign.target_goal)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            r#"
            SELECT id, name, description, start_date, end_date, location,
                   target_goal, status, created_at
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            r#"
            SELECT id, name, description, start_date, end_date, location,
                   target_goal, status, created_at
            FROM campaigns
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// A campaign counts as active while its end date has not passed.
    pub async fn count_active(pool: &PgPool, as_of: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM campaigns WHERE end_date >= $1
            "#,
        )
        .bind(as_of)
        .fetch_one(pool)
        .await
    }
}
