use std::{fmt::Display, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("expected lon,lat but instead received {0}")]
    Format(String),

    #[error("unable to parse latitude from {0}")]
    Latitude(String),

    #[error("unable to parse longitude from {0}")]
    Longitude(String),
}

/// A point in decimal degrees, formatted as `lon,lat` the way OSRM expects it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    lon: f64,
    lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        LonLat { lon, lat }
    }

    /// Parses separate latitude and longitude texts.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, CoordinateError> {
        Ok(LonLat {
            lon: parse_degrees(lon).ok_or_else(|| CoordinateError::Longitude(lon.to_owned()))?,
            lat: parse_degrees(lat).ok_or_else(|| CoordinateError::Latitude(lat.to_owned()))?,
        })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

fn parse_degrees(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|degrees| degrees.is_finite())
}

impl FromStr for LonLat {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split(',').collect::<Vec<_>>();

        match fields.as_slice() {
            [lon, lat] => LonLat::parse(lat, lon),
            _ => Err(CoordinateError::Format(s.to_owned())),
        }
    }
}

impl Display for LonLat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}
