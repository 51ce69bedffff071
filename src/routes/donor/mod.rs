mod handler;
pub mod model;

pub use handler::{donor_form, submit_donor};
