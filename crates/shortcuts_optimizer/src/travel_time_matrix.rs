use std::collections::BTreeMap;

use crate::location::Location;

/// Travel times keyed by origin address, then destination address.
pub type TravelTimes = BTreeMap<String, BTreeMap<String, f64>>;

/// Directed travel durations (seconds) between the locations of a route,
/// indexed by their position in the route input.
/// Stored as a flat vector, `None` for pairs that were never fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTimeMatrix {
    size: usize,
    durations: Vec<Option<f64>>,
}

impl TravelTimeMatrix {
    pub fn new(size: usize) -> Self {
        TravelTimeMatrix {
            size,
            durations: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn set(&mut self, from: usize, to: usize, duration: f64) {
        self.durations[from * self.size + to] = Some(duration);
    }

    pub fn duration(&self, from: usize, to: usize) -> Option<f64> {
        self.durations[from * self.size + to]
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.durations.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.durations
            .iter()
            .enumerate()
            .filter_map(|(index, duration)| {
                duration.map(|duration| (index / self.size, index % self.size, duration))
            })
    }

    /// Sum of the durations along `route`, `None` if one of its legs is
    /// missing.
    pub fn route_duration(&self, route: &[usize]) -> Option<f64> {
        route
            .windows(2)
            .try_fold(0.0, |total, leg| Some(total + self.duration(leg[0], leg[1])?))
    }

    /// Keys the matrix by address. Locations sharing an address share an
    /// entry, the one fetched last in index order wins.
    pub fn to_travel_times(&self, locations: &[Location]) -> TravelTimes {
        let mut travel_times = TravelTimes::new();

        for (from, to, duration) in self.entries() {
            travel_times
                .entry(locations[from].address.clone())
                .or_default()
                .insert(locations[to].address.clone(), duration);
        }

        travel_times
    }
}
