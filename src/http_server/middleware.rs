//! Request middleware

use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};

use crate::model::ApiCallRecord;

use super::state::SharedState;

/// Header carrying the caller's identity, if the client sends one
pub const USER_ID_HEADER: &str = "x-user-id";

/// Record every completed `/api` call in the call history
///
/// The record is queued after the response is built; the response is
/// returned whether or not the record is ever stored.
pub async fn record_api_call(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    // Nested routers see the path with `/api` stripped.
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let user = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let response = next.run(request).await;

    state.call_log.submit(ApiCallRecord::new(
        method,
        path,
        response.status().as_u16(),
        user,
    ));
    response
}
