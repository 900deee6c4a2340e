use std::sync::Arc;

use axum::{Router, routing::post};
use shortcuts_osrm::travel_time_provider::TravelTimeProvider;

use crate::{
    run::post_handler::{not_implemented, optimal_route_handler, travel_time_handler},
    state::AppState,
};

/// Job submission endpoints, one per job name. Each also answers with a
/// trailing slash.
pub fn run_routes<P>() -> Router<Arc<AppState<P>>>
where
    P: TravelTimeProvider,
{
    let optimal_route = post(optimal_route_handler::<P>).fallback(not_implemented);
    let travel_time = post(travel_time_handler::<P>).fallback(not_implemented);

    Router::new()
        .route("/optimal-route", optimal_route.clone())
        .route("/optimal-route/", optimal_route)
        .route("/travel-time", travel_time.clone())
        .route("/travel-time/", travel_time)
}
