//! # HTTP Server Module
//!
//! JSON API over the organization store.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/{location,department,tier,employee}` - CRUD
//! - `/api/query/{q1,q2,q3}` - Salary reports
//!
//! Every `/api` call is queued for the call history.

pub mod config;
mod entity_routes;
pub mod errors;
mod health_routes;
mod middleware;
mod query_routes;
pub mod server;
mod state;

pub use config::HttpServerConfig;
pub use entity_routes::Resource;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use middleware::USER_ID_HEADER;
pub use server::HttpServer;
pub use state::{ApiState, SharedState};
