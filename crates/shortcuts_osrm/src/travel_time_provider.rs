use std::future::Future;

use crate::{
    client::{OsrmClient, OsrmError},
    coordinates::LonLat,
    profile::Profile,
};

/// Source of point-to-point travel durations, in seconds.
///
/// Implementations are shared between concurrently running jobs, so they must
/// be usable through `&self` from several tasks at once.
pub trait TravelTimeProvider: Send + Sync + 'static {
    fn travel_time(
        &self,
        start: LonLat,
        end: LonLat,
        profile: &Profile,
    ) -> impl Future<Output = Result<f64, OsrmError>> + Send;
}

impl TravelTimeProvider for OsrmClient {
    fn travel_time(
        &self,
        start: LonLat,
        end: LonLat,
        profile: &Profile,
    ) -> impl Future<Output = Result<f64, OsrmError>> + Send {
        self.fetch(start, end, profile)
    }
}
