//! Report HTTP Routes
//!
//! `GET /query/q1`, `/query/q2` and `/query/q3` return the report rows as a
//! JSON array. Each request reads a fresh snapshot.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::report::ReportKind;

use super::errors::{ApiError, ApiResult};
use super::state::SharedState;

/// Create report routes
pub fn query_routes() -> Router<SharedState> {
    Router::new().route("/query/:report", get(report_handler))
}

async fn report_handler(
    State(state): State<SharedState>,
    Path(report): Path<String>,
) -> ApiResult<Json<Value>> {
    let kind: ReportKind = report.parse().map_err(ApiError::NotFound)?;
    let rows = state
        .blocking(move |db| -> ApiResult<Value> { Ok(kind.render(&db.snapshot()?)?) })
        .await?;
    Ok(Json(rows))
}
