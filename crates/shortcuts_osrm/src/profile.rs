use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PROFILE: &str = "driving";

/// OSRM travel mode (`driving`, `walking`, `cycling`, ...), passed through to
/// the route service as a path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Profile(String);

impl Profile {
    /// Returns `None` when `name` could not be used as a single URL path
    /// segment.
    pub fn new(name: &str) -> Option<Self> {
        if name.is_empty() {
            return Some(Profile::default());
        }

        name.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            .then(|| Profile(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile(String::from(DEFAULT_PROFILE))
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Profile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Profile::new(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid profile: {name}")))
    }
}
