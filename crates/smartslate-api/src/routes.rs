//! Router assembly.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers::session, state::AppState};

/// Build the session router with shared state and response middleware.
///
/// Method mismatches are answered by axum's method router with `405` and an
/// `Allow` header listing what the route accepts.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/session/issue", post(session::issue))
        .route("/session/me", get(session::me))
        .route(
            "/session/refresh",
            post(session::refresh).options(session::refresh_preflight),
        )
        .route("/session/logout", post(session::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::session_headers,
        ))
        .with_state(state)
}
