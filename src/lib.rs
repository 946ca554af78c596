pub mod config;
pub mod entities;
pub mod error;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod utils;

use std::path::Path;
use std::sync::Arc;

use services::{
    BookingSubmitter, CustomerDirectory, DistanceMatrixClient, DistanceService, HttpSubmitter,
    InMemoryDirectory, StraightLineEstimator,
};

pub use config::Config;
pub use error::{AppError, AppResult};
pub use form::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub customers: Arc<dyn CustomerDirectory>,
    pub distance: Arc<dyn DistanceService>,
    pub submitter: Arc<dyn BookingSubmitter>,
    pub config: Config,
}

impl AppState {
    /// Wire up the outbound services described by `config`
    pub fn from_config(config: Config) -> AppResult<Self> {
        let customers: Arc<dyn CustomerDirectory> = match &config.customer_directory_path {
            Some(path) => Arc::new(InMemoryDirectory::from_json_file(Path::new(path))?),
            None => Arc::new(InMemoryDirectory::seeded()),
        };

        let distance: Arc<dyn DistanceService> = match &config.google_maps_api_key {
            Some(key) => Arc::new(
                DistanceMatrixClient::with_base_url(key, config.http_timeout_secs, &config.distance_matrix_url)
                    .map_err(|e| AppError::Internal(format!("Failed to build distance client: {}", e)))?,
            ),
            None => {
                tracing::warn!("GOOGLE_MAPS_API_KEY not set, using straight-line trip estimates");
                Arc::new(StraightLineEstimator::new(config.average_speed_mph))
            }
        };

        let submitter = HttpSubmitter::new(&config.submission_url, config.http_timeout_secs)
            .map_err(|e| AppError::Internal(format!("Failed to build submission client: {}", e)))?;

        Ok(Self {
            sessions: SessionStore::new(),
            customers,
            distance,
            submitter: Arc::new(submitter),
            config,
        })
    }
}
