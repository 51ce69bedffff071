pub mod auth;
pub mod campaign;
pub mod dashboard;
pub mod donor;
pub mod settings;
