use std::sync::Arc;

use axum::{Router, http::Method, routing::get};
use shortcuts_osrm::travel_time_provider::TravelTimeProvider;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    health::health_handler, run::routes::run_routes, state::AppState, tasks::poll::poll_handler,
};

pub fn app<P>(state: Arc<AppState<P>>) -> Router
where
    P: TravelTimeProvider,
{
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/run", run_routes::<P>())
        .route("/tasks/{task_id}", get(poll_handler::<P>))
        .route("/healthz", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}
