//! Response headers shared by every session endpoint.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use smartslate_auth::{CorsDecision, evaluate_origin};

use crate::state::AppState;

/// Stamps `Cache-Control: no-store` on every session response and, when the
/// request's `Origin` falls under a trusted apex, echoes it back with
/// `Access-Control-Allow-Credentials` and `Vary: Origin`.
///
/// Untrusted origins get no CORS headers at all; the handler still runs,
/// because CORS is a browser-enforced boundary and the server's only job
/// here is correct header emission.
pub async fn session_headers(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    if let CorsDecision::Allow { origin } = evaluate_origin(origin.as_deref(), &state.domains) {
        if let Ok(value) = HeaderValue::from_str(&origin) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
            headers.append(header::VARY, HeaderValue::from_static("Origin"));
        }
    }
    response
}
