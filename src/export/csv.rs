use crate::error::AppError;
use crate::routes::donor::model::Donor;

const HEADER: [&str; 10] = [
    "Donor Code",
    "Name",
    "Blood Type",
    "Age",
    "Gender",
    "Weight",
    "Hemoglobin",
    "Location",
    "Donation Date",
    "Is Eligible",
];

/// Render a donor list as CSV, one row per donor in input order. An empty
/// list produces the header row alone.
pub fn donors_to_csv(donors: &[Donor]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    for donor in donors {
        writer
            .write_record(&[
                donor.unique_code.clone(),
                donor.name.clone(),
                donor.blood_type.clone(),
                donor.age.to_string(),
                donor.gender.clone(),
                donor.weight.to_string(),
                donor.hemoglobin.to_string(),
                donor.location.clone(),
                donor.donation_date.format("%Y-%m-%d %H:%M:%S").to_string(),
                // Rendered capitalized, matching the reports downstream
                // consumers already ingest.
                if donor.is_eligible { "True" } else { "False" }.to_string(),
            ])
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))
}
