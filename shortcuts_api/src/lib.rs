pub mod config;
pub mod error;
mod health;
pub mod routes;
mod run;
pub mod state;
mod tasks;
