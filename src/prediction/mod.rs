//! Prediction module - remote severity service client and result types

mod client;
mod recommendation;
mod types;

pub use client::{PredictionClient, PredictionError, PredictionService, DEFAULT_ENDPOINT};
pub use recommendation::SeverityClass;
pub use types::{
    HealthStatus, Implanted, PredictionOutcome, PredictionRequest, PredictionResponse,
};
