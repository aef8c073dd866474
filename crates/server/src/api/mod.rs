pub mod handlers;
pub mod launches;
pub mod middleware;
pub mod planets;
pub mod routes;

pub use routes::create_router;
