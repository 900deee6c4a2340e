use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{coordinates::LonLat, profile::Profile};

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status from OSRM: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("unexpected code in JSON from OSRM: {0}")]
    UnexpectedCode(String),

    #[error("expected to receive a single route from OSRM but received {0}")]
    UnexpectedRouteCount(usize),
}

#[derive(Deserialize)]
struct OsrmRoute {
    /// Travel time in seconds
    duration: f64,
}

#[derive(Deserialize)]
struct OsrmRouteResponse {
    code: String,

    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";
pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/";

#[derive(Debug, Clone)]
pub struct OsrmClientParams {
    pub osrm_url: String,
    pub timeout: Duration,
}

impl Default for OsrmClientParams {
    fn default() -> Self {
        OsrmClientParams {
            osrm_url: String::from(DEFAULT_OSRM_URL),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the OSRM route service.
///
/// The inner `reqwest::Client` pools connections and is safe to share, clones
/// are cheap and reuse the same pool.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    osrm_url: String,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(params: OsrmClientParams) -> Result<Self, OsrmError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self {
            osrm_url: params.osrm_url.trim_end_matches('/').to_owned(),
            client,
        })
    }

    /// Fetches the travel duration in seconds from `start` to `end`. A single
    /// attempt, retries are up to the caller.
    pub async fn fetch(
        &self,
        start: LonLat,
        end: LonLat,
        profile: &Profile,
    ) -> Result<f64, OsrmError> {
        let url = format!(
            "{}{}{}/{};{}",
            self.osrm_url, OSRM_ROUTE_API_PATH, profile, start, end
        );

        debug!("OsrmClient: GET {}", url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("overview", "false"),
                ("alternatives", "false"),
                ("steps", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(OsrmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let route: OsrmRouteResponse = serde_json::from_slice(&bytes)?;

        if route.code != "Ok" {
            return Err(OsrmError::UnexpectedCode(route.code));
        }

        match route.routes.as_slice() {
            [route] => Ok(route.duration),
            routes => Err(OsrmError::UnexpectedRouteCount(routes.len())),
        }
    }
}
