//! Session endpoint handlers.
//!
//! Each handler is a thin orchestration of the token codec, the
//! cookie-domain resolver, and cookie read/write. No handler touches a
//! datastore; the cookie itself is the only session state.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use smartslate_auth::{
    CookieAttributes, SessionCookie, resolve_cookie_domain, session_cookie_value,
};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct IssueRequest {
    sub: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct IssueQuery {
    #[serde(rename = "redirectTo")]
    redirect_to: Option<String>,
}

/// What a valid cookie decodes to.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    sub: String,
    roles: Vec<String>,
}

/// `POST /session/issue` — mint a portal-wide session cookie.
///
/// The subject and roles are taken as supplied: this endpoint must only be
/// reachable from server-trusted code that has already validated the
/// identity-provider session, never directly from an untrusted browser.
pub async fn issue(
    State(state): State<AppState>,
    Query(query): Query<IssueQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: IssueRequest = if body.is_empty() {
        IssueRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|_| ApiError::BadRequest("invalid JSON body"))?
    };
    let subject = request
        .sub
        .as_deref()
        .filter(|sub| !sub.is_empty())
        .ok_or(ApiError::BadRequest("missing sub"))?;

    let token = state.codec.sign(subject, &request.roles)?;
    let cookie = SessionCookie::issue(token, cookie_attributes(&state, &headers));
    tracing::debug!(domain = ?cookie.attributes.domain, "session cookie issued");

    let mut response = match query.redirect_to.as_deref() {
        Some(location) => {
            let location = HeaderValue::from_str(location)
                .map_err(|_| ApiError::BadRequest("invalid redirectTo"))?;
            let mut response = StatusCode::SEE_OTHER.into_response();
            response.headers_mut().insert(header::LOCATION, location);
            response
        }
        None => Json(json!({ "ok": true })).into_response(),
    };
    set_cookie(&mut response, &cookie)?;
    Ok(response)
}

/// `GET /session/me` — decode the presented cookie.
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ApiError> {
    let token = request_token(&headers).ok_or(ApiError::Unauthenticated)?;
    let claims = state.codec.verify(&token)?;
    Ok(Json(MeResponse {
        sub: claims.sub,
        roles: claims.roles,
    }))
}

/// `POST /session/refresh` — verify, then re-sign with a fresh window.
///
/// The old token string is never reused: a new token gets a new `iat` and
/// nonce, so a compromised token cannot be renewed past the point the
/// legitimate client stops refreshing.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let token = request_token(&headers).ok_or(ApiError::MissingSession)?;
    let claims = state.codec.verify(&token)?;

    let fresh = state.codec.sign(&claims.sub, &claims.roles)?;
    let cookie = SessionCookie::issue(fresh, cookie_attributes(&state, &headers));

    let mut response = Json(json!({ "ok": true })).into_response();
    set_cookie(&mut response, &cookie)?;
    Ok(response)
}

/// `OPTIONS /session/refresh` — CORS preflight for the credentialed
/// cross-subdomain refresh call. The allow/credentials headers come from
/// the shared response middleware.
pub async fn refresh_preflight() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// `POST /session/logout` — overwrite the cookie with an expired one.
///
/// Idempotent; succeeds whether or not a cookie was presented. The cleared
/// cookie is built from the same environment inference as issuance, so the
/// browser honors the deletion.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie = SessionCookie::expired(cookie_attributes(&state, &headers));
    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie.header_value()) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

fn request_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;
    session_cookie_value(header).map(str::to_owned)
}

/// Host used for cookie-domain resolution, in proxy-header order.
fn request_host(headers: &HeaderMap) -> Option<String> {
    ["x-forwarded-host", "host"].iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    })
}

/// Whether the request reached the edge over HTTPS. An absent
/// `X-Forwarded-Proto` counts as HTTPS so production cookies never
/// silently downgrade; local plain-HTTP development sets the header.
fn request_is_https(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .is_none_or(|proto| !proto.eq_ignore_ascii_case("http"))
}

/// The one place the cookie attributes for a request are decided. Issue,
/// Refresh, and Logout all call this, which is what keeps deletion honest.
fn cookie_attributes(state: &AppState, headers: &HeaderMap) -> CookieAttributes {
    let domain =
        request_host(headers).and_then(|host| resolve_cookie_domain(&host, &state.domains));
    CookieAttributes::for_environment(domain, request_is_https(headers))
}

fn set_cookie(response: &mut Response, cookie: &SessionCookie) -> Result<(), ApiError> {
    let value =
        HeaderValue::from_str(&cookie.header_value()).map_err(|_| ApiError::Internal)?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::header::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn forwarded_host_wins_over_host() {
        let map = headers(&[("host", "internal.local"), ("x-forwarded-host", "portal.example.com")]);
        assert_eq!(request_host(&map).as_deref(), Some("portal.example.com"));
    }

    #[test]
    fn absent_proto_counts_as_https() {
        assert!(request_is_https(&headers(&[])));
        assert!(request_is_https(&headers(&[("x-forwarded-proto", "https")])));
        assert!(!request_is_https(&headers(&[("x-forwarded-proto", "http")])));
        assert!(!request_is_https(&headers(&[("x-forwarded-proto", "HTTP")])));
    }
}
