//! Distance/duration estimates for the trip summary.
//!
//! Results are display-only. Callers treat any error as "no estimate".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

use crate::entities::{Location, TripInfo};
use crate::utils::geo::{format_duration, format_miles, haversine_distance, km_to_miles};

pub const DEFAULT_DISTANCE_MATRIX_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

#[derive(Debug, Error)]
pub enum DistanceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Top-level or element status other than `OK`
    #[error("Distance service returned status {0}")]
    Status(String),

    #[error("Distance service response had no route")]
    NoRoute,

    #[error("Invalid distance service URL: {0}")]
    InvalidUrl(String),
}

#[async_trait]
pub trait DistanceService: Send + Sync {
    async fn estimate(&self, pickup: &Location, dropoff: &Location) -> Result<TripInfo, DistanceError>;
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
}

/// Driving estimate from a Distance Matrix API
pub struct DistanceMatrixClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl DistanceMatrixClient {
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, DistanceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| DistanceError::InvalidUrl(format!("'{}': {}", base_url, e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    fn build_url(&self, pickup: &Location, dropoff: &Location) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("origins", &format!("{},{}", pickup.lat, pickup.lng))
            .append_pair("destinations", &format!("{},{}", dropoff.lat, dropoff.lng))
            .append_pair("mode", "driving")
            .append_pair("key", &self.api_key);
        url
    }
}

#[async_trait]
impl DistanceService for DistanceMatrixClient {
    async fn estimate(&self, pickup: &Location, dropoff: &Location) -> Result<TripInfo, DistanceError> {
        let url = self.build_url(pickup, dropoff);
        let body: MatrixResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if body.status != "OK" {
            return Err(DistanceError::Status(body.status));
        }

        let element = body
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or(DistanceError::NoRoute)?;

        if element.status != "OK" {
            return Err(DistanceError::Status(element.status));
        }

        match (element.distance, element.duration) {
            (Some(distance), Some(duration)) => Ok(TripInfo {
                distance: distance.text,
                duration: duration.text,
            }),
            _ => Err(DistanceError::NoRoute),
        }
    }
}

/// Offline estimate: great-circle distance at a fixed average speed
#[derive(Debug, Clone)]
pub struct StraightLineEstimator {
    average_speed_mph: f64,
}

impl StraightLineEstimator {
    pub fn new(average_speed_mph: f64) -> Self {
        Self { average_speed_mph }
    }

    pub fn estimate_now(&self, pickup: &Location, dropoff: &Location) -> TripInfo {
        let km = haversine_distance(pickup.lat, pickup.lng, dropoff.lat, dropoff.lng);
        let miles = km_to_miles(km);
        let minutes = (miles / self.average_speed_mph * 60.0).round() as u64;

        TripInfo {
            distance: format_miles(miles),
            duration: format_duration(minutes),
        }
    }
}

#[async_trait]
impl DistanceService for StraightLineEstimator {
    async fn estimate(&self, pickup: &Location, dropoff: &Location) -> Result<TripInfo, DistanceError> {
        Ok(self.estimate_now(pickup, dropoff))
    }
}
