//! Entity HTTP Routes
//!
//! The same five CRUD endpoints for every entity:
//!
//! - `GET    /{resource}`      list
//! - `GET    /{resource}/:id`  fetch one
//! - `POST   /{resource}`      create
//! - `PUT    /{resource}/:id`  replace
//! - `DELETE /{resource}/:id`  delete (idempotent)

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::model::{Department, Employee, Location, Tier};
use crate::store::Record;

use super::errors::ApiResult;
use super::state::SharedState;

/// An entity exposed over HTTP
pub trait Resource: Record + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Path segment under `/api`
    const PATH: &'static str;
}

impl Resource for Location {
    const PATH: &'static str = "location";
}

impl Resource for Department {
    const PATH: &'static str = "department";
}

impl Resource for Tier {
    const PATH: &'static str = "tier";
}

impl Resource for Employee {
    const PATH: &'static str = "employee";
}

/// Create CRUD routes for `R`
pub fn entity_routes<R: Resource>() -> Router<SharedState> {
    let collection = format!("/{}", R::PATH);
    let item = format!("/{}/:id", R::PATH);

    Router::new()
        .route(&collection, get(list_handler::<R>).post(create_handler::<R>))
        .route(
            &item,
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
}

async fn list_handler<R: Resource>(State(state): State<SharedState>) -> ApiResult<Json<Vec<R>>> {
    Ok(Json(state.blocking(|db| db.list::<R>()).await?))
}

async fn get_handler<R: Resource>(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<R>> {
    let Path(id) = path?;
    Ok(Json(state.blocking(move |db| db.get::<R>(id)).await?))
}

async fn create_handler<R: Resource>(
    State(state): State<SharedState>,
    body: Result<Json<R>, JsonRejection>,
) -> ApiResult<Json<R>> {
    let Json(record) = body?;
    let created = state.blocking(move |db| db.insert(record)).await?;
    debug!(resource = R::PATH, id = created.id(), "created");
    Ok(Json(created))
}

async fn update_handler<R: Resource>(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<R>, JsonRejection>,
) -> ApiResult<Json<R>> {
    let Path(id) = path?;
    let Json(record) = body?;
    Ok(Json(state.blocking(move |db| db.update(id, record)).await?))
}

async fn delete_handler<R: Resource>(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    if !state.blocking(move |db| db.delete::<R>(id)).await? {
        debug!(resource = R::PATH, id, "delete of missing row");
    }
    Ok(StatusCode::NO_CONTENT)
}
