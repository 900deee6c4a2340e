use std::sync::atomic::{AtomicU32, Ordering};

use fxhash::FxHashMap;
use parking_lot::Mutex;
use shortcuts_osrm::{
    client::OsrmError, coordinates::LonLat, profile::Profile,
    travel_time_provider::TravelTimeProvider,
};

use crate::location::Location;

/// In-memory travel time provider. Pairs without a configured duration fail
/// with a `NoRoute` code unless a fallback duration is set.
#[derive(Default)]
pub struct StubTravelTimeProvider {
    durations: FxHashMap<(String, String), f64>,
    fallback: Option<f64>,
    failures_left: AtomicU32,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl StubTravelTimeProvider {
    pub fn uniform(duration: f64) -> Self {
        StubTravelTimeProvider {
            fallback: Some(duration),
            ..Default::default()
        }
    }

    pub fn with_duration(mut self, from: &Location, to: &Location, duration: f64) -> Self {
        self.durations.insert((key(from), key(to)), duration);
        self
    }

    /// The next `failures` calls fail, whatever the pair.
    pub fn failing_first(self, failures: u32) -> Self {
        self.failures_left.store(failures, Ordering::SeqCst);
        self
    }

    /// Requested `(start, end, profile)` triples, coordinates as `lon,lat`.
    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().clone()
    }
}

fn key(location: &Location) -> String {
    location
        .coordinates()
        .expect("stub locations need valid coordinates")
        .to_string()
}

impl TravelTimeProvider for StubTravelTimeProvider {
    async fn travel_time(
        &self,
        start: LonLat,
        end: LonLat,
        profile: &Profile,
    ) -> Result<f64, OsrmError> {
        let pair = (start.to_string(), end.to_string());
        self.calls
            .lock()
            .push((pair.0.clone(), pair.1.clone(), profile.to_string()));

        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            return Err(OsrmError::Api {
                status: 503,
                message: String::from("stub failure"),
            });
        }

        self.durations
            .get(&pair)
            .copied()
            .or(self.fallback)
            .ok_or_else(|| OsrmError::UnexpectedCode(String::from("NoRoute")))
    }
}

/// A location on the equator, `lon` degrees east.
pub fn location(address: &str, lon: &str) -> Location {
    Location {
        address: address.to_owned(),
        lat: String::from("0"),
        lon: lon.to_owned(),
    }
}
