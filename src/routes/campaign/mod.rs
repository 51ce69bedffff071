mod handler;
pub mod model;

pub use handler::{campaign_stats, campaigns, create_campaign, export_csv, export_pdf};
