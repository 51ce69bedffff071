use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::error::AppError;
use crate::routes::campaign::model::Campaign;
use crate::routes::donor::model::Donor;

// US letter.
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const TOP_MM: f32 = 260.0;
const BOTTOM_MM: f32 = 15.0;
const ROW_STEP_MM: f32 = 8.0;

// Table column x positions, in mm from the left edge.
const COLUMNS: [(f32, &str); 6] = [
    (15.0, "Donor Code"),
    (50.0, "Name"),
    (95.0, "Blood Type"),
    (122.0, "Age"),
    (138.0, "Gender"),
    (170.0, "Eligible"),
];

/// Build the per-campaign donor report: campaign heading, date and location
/// lines, then one table row per donor, flowing onto further pages as needed.
pub fn campaign_report_pdf(campaign: &Campaign, donors: &[Donor]) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Campaign {} Report", campaign.id),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = TOP_MM;

    layer.use_text(
        format!("Campaign: {}", campaign.name),
        18.0,
        Mm(15.0),
        Mm(y),
        &bold,
    );
    y -= 10.0;
    layer.use_text(
        format!(
            "Date: {} - {}",
            campaign.start_date.format("%Y-%m-%d"),
            campaign.end_date.format("%Y-%m-%d")
        ),
        11.0,
        Mm(15.0),
        Mm(y),
        &regular,
    );
    y -= 7.0;
    layer.use_text(
        format!("Location: {}", campaign.location),
        11.0,
        Mm(15.0),
        Mm(y),
        &regular,
    );
    y -= 12.0;

    write_table_header(&layer, &bold, y);
    y -= ROW_STEP_MM;

    for donor in donors {
        if y < BOTTOM_MM {
            layer = new_page(&doc);
            y = TOP_MM;
            write_table_header(&layer, &bold, y);
            y -= ROW_STEP_MM;
        }

        let age = donor.age.to_string();
        let eligible = if donor.is_eligible { "Yes" } else { "No" };
        let cells = [
            donor.unique_code.as_str(),
            donor.name.as_str(),
            donor.blood_type.as_str(),
            age.as_str(),
            donor.gender.as_str(),
            eligible,
        ];
        for ((x, _), cell) in COLUMNS.iter().zip(cells) {
            layer.use_text(cell, 10.0, Mm(*x), Mm(y), &regular);
        }
        y -= ROW_STEP_MM;
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn write_table_header(layer: &PdfLayerReference, font: &IndirectFontRef, y: f32) {
    for (x, title) in COLUMNS {
        layer.use_text(title, 11.0, Mm(x), Mm(y), font);
    }
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

/// Attachment file name for a campaign's PDF report.
pub fn report_file_name(campaign_id: i64) -> String {
    format!("campaign_{}_report.pdf", campaign_id)
}
