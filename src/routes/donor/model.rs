use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::utils::generate_donor_code;

// Bounded regeneration on a colliding donor code before giving up.
const CODE_RETRY_LIMIT: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donor {
    pub id: i64,
    pub unique_code: String,
    pub campaign_id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub blood_type: String,
    pub weight: f64,
    pub hemoglobin: f64,
    pub location: String,
    pub medical_conditions: Option<String>,
    pub is_eligible: bool,
    pub donation_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Raw form payload. Numeric fields arrive as text; parsing happens in
/// `parse` so a bad field reports what was wrong with it. Values are stored
/// as given, without range checks.
#[derive(Debug, Deserialize)]
pub struct CreateDonorRequest {
    pub campaign_id: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub blood_type: String,
    pub weight: String,
    pub hemoglobin: String,
    pub location: String,
    pub medical_conditions: Option<String>,
    pub is_eligible: Option<String>,
}

#[derive(Debug)]
pub struct NewDonor {
    pub campaign_id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub blood_type: String,
    pub weight: f64,
    pub hemoglobin: f64,
    pub location: String,
    pub medical_conditions: Option<String>,
    pub is_eligible: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitDonorResponse {
    pub success: bool,
    pub donor_code: String,
}

impl CreateDonorRequest {
    pub fn parse(self) -> Result<NewDonor, AppError> {
        let campaign_id = self
            .campaign_id
            .trim()
            .parse::<i64>()
            .map_err(|e| AppError::Validation(format!("invalid campaign_id: {}", e)))?;
        let age = self
            .age
            .trim()
            .parse::<i32>()
            .map_err(|e| AppError::Validation(format!("invalid age: {}", e)))?;
        let weight = self
            .weight
            .trim()
            .parse::<f64>()
            .map_err(|e| AppError::Validation(format!("invalid weight: {}", e)))?;
        let hemoglobin = self
            .hemoglobin
            .trim()
            .parse::<f64>()
            .map_err(|e| AppError::Validation(format!("invalid hemoglobin: {}", e)))?;

        Ok(NewDonor {
            campaign_id,
            name: self.name,
            age,
            gender: self.gender,
            blood_type: self.blood_type,
            weight,
            hemoglobin,
            location: self.location,
            medical_conditions: self.medical_conditions,
            is_eligible: self.is_eligible.as_deref().unwrap_or("true") == "true",
        })
    }
}

impl Donor {
    /// Insert one donor row. The code is generated server-side; if it happens
    /// to collide with an existing one the insert is retried with a fresh
    /// code a bounded number of times. A dangling campaign_id surfaces as a
    /// foreign-key violation from the store.
    pub async fn create(pool: &PgPool, donor: NewDonor) -> Result<Self, sqlx::Error> {
        let mut attempts = 0;
        loop {
            let unique_code = generate_donor_code();
            let result = sqlx::query_as::<_, Donor>(
                r#"
                INSERT INTO donors (
                    unique_code, campaign_id, name, age, gender, blood_type,
                    weight, hemoglobin, location, medical_conditions, is_eligible
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING id, unique_code, campaign_id, name, age, gender, blood_type,
                          weight, hemoglobin, location, medical_conditions, is_eligible,
                          donation_date, created_at
                "#,
            )
            .bind(&unique_code)
            .bind(donor.campaign_id)
            .bind(&donor.name)
            .bind(donor.age)
            .bind(&donor.gender)
            .bind(&donor.blood_type)
            .bind(donor.weight)
            .bind(donor.hemoglobin)
            .bind(&donor.location)
            .bind(&donor.medical_conditions)
            .bind(donor.is_eligible)
            .fetch_one(pool)
            .await;

            match result {
                Ok(created) => return Ok(created),
                Err(e) => {
                    let code_collision = matches!(
                        &e,
                        sqlx::Error::Database(db)
                            if db.constraint() == Some("donors_unique_code_key")
                    );
                    attempts += 1;
                    if code_collision && attempts < CODE_RETRY_LIMIT {
                        tracing::warn!(
                            "donor code {} collided, regenerating (attempt {})",
                            unique_code,
                            attempts
                        );
                        continue;
                    }
                    return Err(e);
                }
            }
        }
    }

    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Donor>(
            r#"
            SELECT id, unique_code, campaign_id, name, age, gender, blood_type,
                   weight, hemoglobin, location, medical_conditions, is_eligible,
                   donation_date, created_at
            FROM donors
            WHERE campaign_id = $1
            ORDER BY id
            "#,
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Donor>(
            r#"
            SELECT id, unique_code, campaign_id, name, age, gender, blood_type,
                   weight, hemoglobin, location, medical_conditions, is_eligible,
                   donation_date, created_at
            FROM donors
            ORDER BY donation_date DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM donors")
            .fetch_one(pool)
            .await
    }

    pub async fn count_eligible(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM donors WHERE is_eligible")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateDonorRequest {
        CreateDonorRequest {
            campaign_id: "7".into(),
            name: "Jane Roe".into(),
            age: "29".into(),
            gender: "Female".into(),
            blood_type: "O+".into(),
            weight: "61.5".into(),
            hemoglobin: "13.2".into(),
            location: "Ward 3".into(),
            medical_conditions: None,
            is_eligible: None,
        }
    }

    #[test]
    fn parse_defaults_eligibility_to_true() {
        let donor = base_request().parse().unwrap();
        assert!(donor.is_eligible);
        assert_eq!(donor.campaign_id, 7);
        assert_eq!(donor.age, 29);
    }

    #[test]
    fn parse_honours_explicit_eligibility() {
        let mut req = base_request();
        req.is_eligible = Some("false".into());
        assert!(!req.parse().unwrap().is_eligible);
    }

    #[test]
    fn parse_rejects_non_numeric_fields() {
        for field in ["campaign_id", "age", "weight", "hemoglobin"] {
            let mut req = base_request();
            match field {
                "campaign_id" => req.campaign_id = "abc".into(),
                "age" => req.age = "twenty".into(),
                "weight" => req.weight = "heavy".into(),
                _ => req.hemoglobin = "?".into(),
            }
            assert!(
                matches!(req.parse(), Err(AppError::Validation(_))),
                "field {} accepted garbage",
                field
            );
        }
    }

    #[test]
    fn parse_keeps_out_of_range_values() {
        // Range validation is intentionally absent; the store accepts what
        // the caller asserts.
        let mut req = base_request();
        req.age = "-3".into();
        req.weight = "0".into();
        let donor = req.parse().unwrap();
        assert_eq!(donor.age, -3);
        assert_eq!(donor.weight, 0.0);
    }
}
