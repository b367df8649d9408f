pub mod config;
pub mod entities;
pub mod error;
pub mod ports;
pub mod query;
pub mod report;
pub mod use_cases;

pub use error::Error;
