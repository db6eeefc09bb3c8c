//! HTTP client for the remote severity prediction service.
//!
//! Requests are blocking and meant to run off the UI thread. There is no retry
//! and, unless a timeout is configured, no deadline.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info};

use super::{HealthStatus, PredictionRequest, PredictionResponse};

/// Endpoint the form posts to when no setting overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://safe-intel-623106008673.europe-west1.run.app/predict";

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("{context} failed with status: {status}")]
    Status { context: &'static str, status: u16 },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Invalid endpoint URL {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// Seam between the form and the network.
pub trait PredictionService: Send + Sync {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictionError>;

    fn health(&self) -> Result<HealthStatus, PredictionError>;
}

/// `reqwest`-backed [`PredictionService`].
pub struct PredictionClient {
    client: Client,
    endpoint: Url,
}

impl PredictionClient {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, PredictionError> {
        let endpoint = Url::parse(endpoint).map_err(|e| PredictionError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        // `None` disables the blocking client's default 30s deadline.
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sibling `health` path of the predict URL.
    pub fn health_url(&self) -> Result<Url, PredictionError> {
        self.endpoint
            .join("health")
            .map_err(|e| PredictionError::InvalidEndpoint {
                url: self.endpoint.to_string(),
                reason: e.to_string(),
            })
    }
}

impl PredictionService for PredictionClient {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictionError> {
        debug!("POST {} {:?}", self.endpoint, request);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()?;

        let status = response.status();
        info!("Prediction response status: {}", status);
        if !status.is_success() {
            return Err(PredictionError::Status {
                context: "Prediction",
                status: status.as_u16(),
            });
        }

        Ok(response.json()?)
    }

    fn health(&self) -> Result<HealthStatus, PredictionError> {
        let url = self.health_url()?;
        debug!("GET {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::Status {
                context: "Health check",
                status: status.as_u16(),
            });
        }

        Ok(response.json()?)
    }
}
