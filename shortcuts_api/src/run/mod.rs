pub mod post_handler;
pub mod routes;
