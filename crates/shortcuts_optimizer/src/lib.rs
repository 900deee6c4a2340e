pub mod location;
pub mod optimal_route;
pub mod retry;
pub mod travel_time;
pub mod travel_time_matrix;
mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
