use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{Method, StatusCode},
};
use shortcuts_jobs::task::Task;
use shortcuts_optimizer::{
    optimal_route::{OptimalRouteInput, OptimalRouteJob},
    travel_time::{TravelTimeInput, TravelTimeJob},
};
use shortcuts_osrm::travel_time_provider::TravelTimeProvider;

use crate::{error::ApiError, state::AppState};

pub async fn optimal_route_handler<P>(
    State(state): State<Arc<AppState<P>>>,
    body: Result<Json<OptimalRouteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    P: TravelTimeProvider,
{
    let Json(input) = body?;

    let job = OptimalRouteJob::new(
        input,
        Arc::clone(&state.travel_time_provider),
        state.optimizer_params,
    );
    let task = state.engine.submit(job);

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn travel_time_handler<P>(
    State(state): State<Arc<AppState<P>>>,
    body: Result<Json<TravelTimeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    P: TravelTimeProvider,
{
    let Json(input) = body?;

    let retry = input.retry_policy(state.optimizer_params.retry);
    let job = TravelTimeJob::new(input, Arc::clone(&state.travel_time_provider), retry);
    let task = state.engine.submit(job);

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn not_implemented(method: Method) -> ApiError {
    ApiError::NotImplemented(format!("Not Implemented: {method}"))
}
