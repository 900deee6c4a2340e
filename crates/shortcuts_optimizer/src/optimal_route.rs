use std::{iter, sync::Arc};

use futures::{StreamExt, TryStreamExt, stream};
use serde::{Deserialize, Serialize};
use shortcuts_jobs::executable::Executable;
use shortcuts_osrm::{
    client::OsrmError,
    coordinates::{CoordinateError, LonLat},
    profile::Profile,
    travel_time_provider::TravelTimeProvider,
};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::{
    location::Location,
    retry::RetryPolicy,
    travel_time_matrix::{TravelTimeMatrix, TravelTimes},
    utils::permutations::permutations,
};

pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Above this many stops the exhaustive search gets slow, (n - 2)! candidates.
const LARGE_STOP_COUNT: usize = 9;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("invalid coordinates for {address}: {source}")]
    Coordinate {
        address: String,
        #[source]
        source: CoordinateError,
    },

    #[error("failed to fetch travel time from {from} to {to}: {source}")]
    TravelTime {
        from: String,
        to: String,
        #[source]
        source: OsrmError,
    },

    #[error("unable to find the best route")]
    NoRoute,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OptimalRouteInput {
    pub origin: Location,
    pub destination: Location,

    #[serde(default)]
    pub stops: Vec<Location>,

    #[serde(default)]
    pub profile: Profile,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OptimalRouteResult {
    pub travel_times: TravelTimes,
    pub best_route: Vec<Location>,
    pub best_route_time: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct OptimizerParams {
    pub retry: RetryPolicy,

    /// Travel time requests in flight at once within a single optimization.
    pub max_concurrent_requests: usize,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        OptimizerParams {
            retry: RetryPolicy::default(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

/// Finds the fastest order to visit every stop between a fixed origin and
/// destination.
pub struct OptimalRouteJob<P> {
    input: OptimalRouteInput,
    provider: Arc<P>,
    params: OptimizerParams,
}

impl<P> OptimalRouteJob<P>
where
    P: TravelTimeProvider,
{
    pub fn new(input: OptimalRouteInput, provider: Arc<P>, params: OptimizerParams) -> Self {
        OptimalRouteJob {
            input,
            provider,
            params,
        }
    }
}

impl<P> Executable for OptimalRouteJob<P>
where
    P: TravelTimeProvider,
{
    const NAME: &'static str = "optimal-route";
    type Output = OptimalRouteResult;
    type Error = OptimizeError;

    async fn execute(self) -> Result<OptimalRouteResult, OptimizeError> {
        let OptimalRouteJob {
            input,
            provider,
            params,
        } = self;

        optimize(input, provider.as_ref(), &params).await
    }
}

#[instrument(skip_all, fields(stops = input.stops.len(), profile = %input.profile))]
pub async fn optimize<P>(
    input: OptimalRouteInput,
    provider: &P,
    params: &OptimizerParams,
) -> Result<OptimalRouteResult, OptimizeError>
where
    P: TravelTimeProvider,
{
    let OptimalRouteInput {
        origin,
        destination,
        stops,
        profile,
    } = input;

    let stop_count = stops.len();
    let candidates = (1..=stop_count as u64).try_fold(1u64, u64::checked_mul);
    info!(candidates = ?candidates, "Optimizing route");
    if stop_count > LARGE_STOP_COUNT {
        warn!("{} stops is a lot for an exhaustive search", stop_count);
    }

    let locations = iter::once(origin)
        .chain(stops)
        .chain(iter::once(destination))
        .collect::<Vec<_>>();

    let matrix = build_travel_time_matrix(provider, &locations, &profile, params).await?;
    let (route, best_route_time) = find_best_route(&matrix).ok_or(OptimizeError::NoRoute)?;

    Ok(OptimalRouteResult {
        travel_times: matrix.to_travel_times(&locations),
        best_route: route
            .into_iter()
            .map(|index| locations[index].clone())
            .collect(),
        best_route_time,
    })
}

/// Fetches the travel time for every leg a route may use. `locations` starts
/// with the origin and ends with the destination: legs into the origin or out
/// of the destination are skipped. Fails as soon as one leg exhausts its
/// retries.
async fn build_travel_time_matrix<P>(
    provider: &P,
    locations: &[Location],
    profile: &Profile,
    params: &OptimizerParams,
) -> Result<TravelTimeMatrix, OptimizeError>
where
    P: TravelTimeProvider,
{
    let coordinates = locations
        .iter()
        .map(|location| {
            location
                .coordinates()
                .map_err(|source| OptimizeError::Coordinate {
                    address: location.address.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<LonLat>, _>>()?;

    let size = locations.len();
    let origin = 0;
    let destination = size - 1;

    let legs = (0..size)
        .flat_map(|from| (0..size).map(move |to| (from, to)))
        .filter(|&(from, to)| from != to && from != destination && to != origin)
        .collect::<Vec<_>>();

    debug!("Fetching {} travel times", legs.len());

    let coordinates = &coordinates;
    let retry = &params.retry;
    let durations = stream::iter(legs)
        .map(move |(from, to)| async move {
            let duration = retry
                .run(|| provider.travel_time(coordinates[from], coordinates[to], profile))
                .await
                .map_err(|source| OptimizeError::TravelTime {
                    from: locations[from].address.clone(),
                    to: locations[to].address.clone(),
                    source,
                })?;

            debug!(
                "Travel time from {} to {} is {}",
                locations[from].street(),
                locations[to].street(),
                duration
            );

            Ok::<_, OptimizeError>((from, to, duration))
        })
        .buffer_unordered(params.max_concurrent_requests.max(1))
        .try_collect::<Vec<_>>()
        .await?;

    let mut matrix = TravelTimeMatrix::new(size);
    for (from, to, duration) in durations {
        matrix.set(from, to, duration);
    }

    Ok(matrix)
}

/// Tries every order of the stops, the origin (index 0) first and the
/// destination (last index) last. Orders are enumerated lexicographically by
/// stop index, so on ties the earliest order wins.
pub fn find_best_route(matrix: &TravelTimeMatrix) -> Option<(Vec<usize>, f64)> {
    let size = matrix.size();
    if size < 2 {
        return None;
    }

    let destination = size - 1;
    let mut best: Option<(Vec<usize>, f64)> = None;

    for order in permutations(size - 2) {
        let route = iter::once(0)
            .chain(order.into_iter().map(|stop| stop + 1))
            .chain(iter::once(destination))
            .collect::<Vec<_>>();

        let Some(duration) = matrix.route_duration(&route) else {
            continue;
        };

        if best
            .as_ref()
            .is_none_or(|(_, best_duration)| duration < *best_duration)
        {
            best = Some((route, duration));
        }
    }

    best
}
