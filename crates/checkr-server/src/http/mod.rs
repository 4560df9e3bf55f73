pub mod analyze;
pub mod models;
pub mod response;
