//! Pass-through routes in front of the outlet backend.
//!
//! Bodies are returned bare (no envelope) so the map page and any older
//! clients see exactly the backend's JSON shapes.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use catchment_core::{LocationSummary, Outlet};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_client_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct OutletsQuery {
    geocoded_only: Option<bool>,
}

pub(super) async fn list_outlets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<OutletsQuery>,
) -> Result<Json<Vec<Outlet>>, ApiError> {
    let geocoded_only = params.geocoded_only.unwrap_or(true);
    state
        .client
        .outlets(geocoded_only)
        .await
        .map(Json)
        .map_err(|e| map_client_error(req_id.0, &e))
}

pub(super) async fn search_outlets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(query): Path<String>,
) -> Result<Json<Vec<Outlet>>, ApiError> {
    state
        .client
        .search(&query)
        .await
        .map(Json)
        .map_err(|e| map_client_error(req_id.0, &e))
}

pub(super) async fn location_outlets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(location): Path<String>,
) -> Result<Json<LocationSummary>, ApiError> {
    state
        .client
        .location(&location)
        .await
        .map(Json)
        .map_err(|e| map_client_error(req_id.0, &e))
}
