//! smartslate-api
//!
//! HTTP surface of the cross-subdomain session service: four endpoints
//! (`issue`, `me`, `refresh`, `logout`) over one cookie, stateless per
//! request. Token, cookie, and trust primitives live in `smartslate-auth`;
//! this crate only wires them to axum and maps errors at the boundary.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
