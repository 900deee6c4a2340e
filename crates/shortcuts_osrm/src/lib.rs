pub mod client;
pub mod coordinates;
pub mod profile;
pub mod travel_time_provider;
