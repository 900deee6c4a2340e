use std::net::IpAddr;
use std::time::Duration;

use clap::Parser;
use shortcuts_optimizer::{
    optimal_route::{DEFAULT_MAX_CONCURRENT_REQUESTS, OptimizerParams},
    retry::{self, RetryPolicy},
};
use shortcuts_osrm::client::{DEFAULT_OSRM_URL, OsrmClientParams};

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL of the OSRM routing service
    #[arg(long, env = "OSRM_URL", default_value = DEFAULT_OSRM_URL)]
    pub osrm_url: String,

    #[arg(long, env = "OSRM_TIMEOUT_SECS", default_value_t = 10)]
    pub osrm_timeout_secs: u64,

    /// Attempts per travel time request, including the first one
    #[arg(long, env = "ROUTE_RETRY_ATTEMPTS", default_value_t = retry::DEFAULT_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub retry_attempts: u32,

    #[arg(long, env = "ROUTE_RETRY_DELAY_MS", default_value_t = 500)]
    pub retry_delay_ms: u64,

    /// Travel time requests in flight at once for a single route optimization
    #[arg(long, env = "ROUTE_FETCH_CONCURRENCY", default_value_t = DEFAULT_MAX_CONCURRENT_REQUESTS as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub fetch_concurrency: u64,

    #[arg(short, long)]
    pub debug: bool,
}

impl AppConfig {
    pub fn osrm_params(&self) -> OsrmClientParams {
        OsrmClientParams {
            osrm_url: self.osrm_url.clone(),
            timeout: Duration::from_secs(self.osrm_timeout_secs),
        }
    }

    pub fn optimizer_params(&self) -> OptimizerParams {
        OptimizerParams {
            retry: RetryPolicy {
                attempts: self.retry_attempts,
                delay: Duration::from_millis(self.retry_delay_ms),
            },
            max_concurrent_requests: usize::try_from(self.fetch_concurrency).unwrap_or(usize::MAX),
        }
    }
}
