pub mod fetch;
pub mod analyze;
