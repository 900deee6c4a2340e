use std::sync::Arc;

use shortcuts_jobs::job_engine::JobEngine;
use shortcuts_optimizer::optimal_route::OptimizerParams;
use shortcuts_osrm::client::OsrmClient;

pub struct AppState<P = OsrmClient> {
    pub engine: JobEngine,
    pub travel_time_provider: Arc<P>,
    pub optimizer_params: OptimizerParams,
}

impl<P> AppState<P> {
    pub fn new(travel_time_provider: P, optimizer_params: OptimizerParams) -> Self {
        AppState {
            engine: JobEngine::default(),
            travel_time_provider: Arc::new(travel_time_provider),
            optimizer_params,
        }
    }
}
