//! Pure aggregate views over donor records. No I/O, no mutation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::routes::donor::model::Donor;

/// Fixed four-bucket age histogram. Assignment is by upper bound only
/// (`age <= 25`, `<= 35`, `<= 45`, else `46+`), so ages below 18 land in the
/// first bucket.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct AgeGroups {
    #[serde(rename = "18-25")]
    pub group_18_25: u32,
    #[serde(rename = "26-35")]
    pub group_26_35: u32,
    #[serde(rename = "36-45")]
    pub group_36_45: u32,
    #[serde(rename = "46+")]
    pub group_46_plus: u32,
}

impl AgeGroups {
    fn record(&mut self, age: i32) {
        if age <= 25 {
            self.group_18_25 += 1;
        } else if age <= 35 {
            self.group_26_35 += 1;
        } else if age <= 45 {
            self.group_36_45 += 1;
        } else {
            self.group_46_plus += 1;
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CampaignStats {
    pub total_donors: usize,
    pub eligible_donors: usize,
    pub blood_types: BTreeMap<String, u32>,
    pub gender_distribution: BTreeMap<String, u32>,
    pub age_groups: AgeGroups,
}

pub fn compute_campaign_stats(donors: &[Donor]) -> CampaignStats {
    let mut stats = CampaignStats {
        total_donors: donors.len(),
        ..CampaignStats::default()
    };

    for donor in donors {
        if donor.is_eligible {
            stats.eligible_donors += 1;
        }
        *stats.blood_types.entry(donor.blood_type.clone()).or_insert(0) += 1;
        *stats
            .gender_distribution
            .entry(donor.gender.clone())
            .or_insert(0) += 1;
        stats.age_groups.record(donor.age);
    }

    stats
}

/// Share of eligible donors in percent, one decimal. Zero donors yields 0.
pub fn success_rate(total: i64, eligible: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(eligible as f64 / total as f64 * 100.0)
}

/// Estimated collected volume in litres, assuming 0.45 l per eligible donor.
pub fn blood_collected(eligible: i64) -> f64 {
    round_one_decimal(eligible as f64 * 0.45)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn donor(age: i32, gender: &str, blood_type: &str, eligible: bool) -> Donor {
        Donor {
            id: 0,
            unique_code: "DN00000000".into(),
            campaign_id: 1,
            name: "Test Donor".into(),
            age,
            gender: gender.into(),
            blood_type: blood_type.into(),
            weight: 70.0,
            hemoglobin: 13.5,
            location: "Clinic".into(),
            medical_conditions: None,
            is_eligible: eligible,
            donation_date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_input_yields_all_zeros() {
        let stats = compute_campaign_stats(&[]);
        assert_eq!(stats.total_donors, 0);
        assert_eq!(stats.eligible_donors, 0);
        assert!(stats.blood_types.is_empty());
        assert!(stats.gender_distribution.is_empty());
        assert_eq!(stats.age_groups, AgeGroups::default());
    }

    #[test]
    fn bucket_boundaries() {
        let donors = vec![
            donor(25, "F", "A+", true),
            donor(26, "M", "A+", true),
            donor(45, "F", "B-", true),
            donor(46, "M", "O+", true),
        ];
        let stats = compute_campaign_stats(&donors);
        assert_eq!(stats.age_groups.group_18_25, 1);
        assert_eq!(stats.age_groups.group_26_35, 1);
        assert_eq!(stats.age_groups.group_36_45, 1);
        assert_eq!(stats.age_groups.group_46_plus, 1);
    }

    #[test]
    fn ages_below_eighteen_fall_in_first_bucket() {
        // The rule has no lower bound; 0 and negative ages count as 18-25.
        let donors = vec![donor(0, "F", "A+", true), donor(-4, "M", "A+", true)];
        let stats = compute_campaign_stats(&donors);
        assert_eq!(stats.age_groups.group_18_25, 2);
    }

    #[test]
    fn counts_by_blood_type_and_gender() {
        let donors = vec![
            donor(30, "Female", "O+", true),
            donor(40, "Female", "O+", false),
            donor(50, "Male", "AB-", true),
        ];
        let stats = compute_campaign_stats(&donors);
        assert_eq!(stats.total_donors, 3);
        assert_eq!(stats.eligible_donors, 2);
        assert_eq!(stats.blood_types.get("O+"), Some(&2));
        assert_eq!(stats.blood_types.get("AB-"), Some(&1));
        assert_eq!(stats.gender_distribution.get("Female"), Some(&2));
        assert_eq!(stats.gender_distribution.get("Male"), Some(&1));
    }

    #[test]
    fn stats_serialize_with_bucket_labels() {
        let json = serde_json::to_value(compute_campaign_stats(&[])).unwrap();
        let groups = json.get("age_groups").unwrap();
        for label in ["18-25", "26-35", "36-45", "46+"] {
            assert_eq!(groups.get(label).unwrap(), 0);
        }
    }

    #[test]
    fn success_rate_handles_zero_total() {
        assert_eq!(success_rate(0, 0), 0.0);
    }

    #[test]
    fn success_rate_rounds_to_one_decimal() {
        assert_eq!(success_rate(4, 3), 75.0);
        assert_eq!(success_rate(3, 1), 33.3);
    }

    #[test]
    fn collected_volume_estimate() {
        assert_eq!(blood_collected(10), 4.5);
        assert_eq!(blood_collected(0), 0.0);
        assert_eq!(blood_collected(4), 1.8);
    }
}
