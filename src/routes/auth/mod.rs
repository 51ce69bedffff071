mod handler;
pub mod model;

pub use handler::{login, login_page, logout};
