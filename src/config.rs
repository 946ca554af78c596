use std::env;

use crate::services::distance::DEFAULT_DISTANCE_MATRIX_URL;
use crate::services::submission::DEFAULT_SUBMISSION_URL;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub submission_url: String,
    /// Without a key, trip estimates fall back to straight-line distance
    pub google_maps_api_key: Option<String>,
    pub distance_matrix_url: String,
    pub places_country: String,
    pub http_timeout_secs: u64,
    pub customer_directory_path: Option<String>,
    pub average_speed_mph: f64,
    /// Form sessions untouched for this long are dropped
    pub form_session_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            submission_url: DEFAULT_SUBMISSION_URL.to_string(),
            google_maps_api_key: None,
            distance_matrix_url: DEFAULT_DISTANCE_MATRIX_URL.to_string(),
            places_country: "us".to_string(),
            http_timeout_secs: 30,
            customer_directory_path: None,
            average_speed_mph: 30.0,
            form_session_ttl_secs: 1800,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            submission_url: env::var("SUBMISSION_URL").unwrap_or(defaults.submission_url),
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            distance_matrix_url: env::var("DISTANCE_MATRIX_URL")
                .unwrap_or(defaults.distance_matrix_url),
            places_country: env::var("PLACES_COUNTRY").unwrap_or(defaults.places_country),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("HTTP_TIMEOUT_SECS must be a number"),
            customer_directory_path: env::var("CUSTOMER_DIRECTORY_PATH").ok(),
            average_speed_mph: env::var("AVERAGE_SPEED_MPH")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("AVERAGE_SPEED_MPH must be a number"),
            form_session_ttl_secs: env::var("FORM_SESSION_TTL_SECS")
                .unwrap_or_else(|_| "1800".to_string())
                .parse()
                .expect("FORM_SESSION_TTL_SECS must be a number"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
