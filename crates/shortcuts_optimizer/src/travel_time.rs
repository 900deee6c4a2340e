use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Deserializer, Serialize, de};
use shortcuts_jobs::executable::Executable;
use shortcuts_osrm::{
    client::OsrmError,
    coordinates::{CoordinateError, LonLat},
    profile::Profile,
    travel_time_provider::TravelTimeProvider,
};
use thiserror::Error;
use tracing::instrument;

use crate::retry::RetryPolicy;

#[derive(Debug, Error)]
pub enum TravelTimeError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error("failed to fetch travel time: {0}")]
    TravelTime(#[from] OsrmError),

    #[error("travel time request timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Deserialize, Debug, Clone)]
pub struct TravelTimeInput {
    /// `lon,lat`
    pub start_lon_lat: String,
    /// `lon,lat`
    pub end_lon_lat: String,

    #[serde(default)]
    pub profile: Profile,

    /// Attempts in total, overrides the service default.
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Per attempt, in seconds.
    #[serde(default, deserialize_with = "deserialize_seconds")]
    pub timeout_seconds: Option<Duration>,

    #[serde(default, deserialize_with = "deserialize_seconds")]
    pub retry_pause_seconds: Option<Duration>,
}

impl TravelTimeInput {
    pub fn new(start_lon_lat: &str, end_lon_lat: &str) -> Self {
        TravelTimeInput {
            start_lon_lat: start_lon_lat.to_owned(),
            end_lon_lat: end_lon_lat.to_owned(),
            profile: Profile::default(),
            max_retries: None,
            timeout_seconds: None,
            retry_pause_seconds: None,
        }
    }

    /// `default` with the fields set on this request applied on top.
    pub fn retry_policy(&self, default: RetryPolicy) -> RetryPolicy {
        RetryPolicy {
            attempts: self.max_retries.unwrap_or(default.attempts),
            delay: self.retry_pause_seconds.unwrap_or(default.delay),
        }
    }
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(|seconds| Duration::try_from_secs_f64(seconds).map_err(de::Error::custom))
        .transpose()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TravelTimeResult {
    pub duration: f64,
    pub profile: Profile,
}

/// Travel time between two points.
pub struct TravelTimeJob<P> {
    input: TravelTimeInput,
    provider: Arc<P>,
    retry: RetryPolicy,
}

impl<P> TravelTimeJob<P>
where
    P: TravelTimeProvider,
{
    pub fn new(input: TravelTimeInput, provider: Arc<P>, retry: RetryPolicy) -> Self {
        TravelTimeJob {
            input,
            provider,
            retry,
        }
    }
}

impl<P> Executable for TravelTimeJob<P>
where
    P: TravelTimeProvider,
{
    const NAME: &'static str = "travel-time";
    type Output = TravelTimeResult;
    type Error = TravelTimeError;

    async fn execute(self) -> Result<TravelTimeResult, TravelTimeError> {
        travel_time(self.input, self.provider.as_ref(), &self.retry).await
    }
}

#[instrument(skip(provider, retry), level = "debug")]
async fn travel_time<P>(
    input: TravelTimeInput,
    provider: &P,
    retry: &RetryPolicy,
) -> Result<TravelTimeResult, TravelTimeError>
where
    P: TravelTimeProvider,
{
    let start: LonLat = input.start_lon_lat.parse()?;
    let end: LonLat = input.end_lon_lat.parse()?;

    let timeout = input.timeout_seconds;
    let profile = &input.profile;
    let duration = retry
        .run(move || async move {
            let request = provider.travel_time(start, end, profile);
            match timeout {
                Some(limit) => tokio::time::timeout(limit, request)
                    .await
                    .map_err(|_| TravelTimeError::Timeout(limit))?
                    .map_err(TravelTimeError::from),
                None => request.await.map_err(TravelTimeError::from),
            }
        })
        .await?;

    Ok(TravelTimeResult {
        duration,
        profile: input.profile,
    })
}
