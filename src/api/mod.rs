// API routes and handlers

pub mod analysis;
pub mod error;
pub mod health;
pub mod routes;

pub use error::AnalysisApiError;
