mod handler;
pub mod model;

pub use handler::{change_password, settings, update_campaign_settings, update_profile};
