//! Routes backed by the headless map: the precomputed scene, server-side
//! query routing, and rendered outlet detail.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use catchment_core::Outlet;
use catchment_map::panel::{outlet_detail_html, search_results_html};
use catchment_map::{route, MapApp, MapScene};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_client_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SceneData {
    pub outlet_count: usize,
    pub overlap_count: usize,
    pub scene: MapScene,
}

#[derive(Debug, Serialize)]
pub(super) struct QueryData {
    pub intent: &'static str,
    pub title: String,
    pub outlets: Vec<Outlet>,
    pub panel_html: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DetailData {
    pub outlet: Outlet,
    pub panel_html: String,
}

/// Loads the geocoded feed into a fresh map and returns every layer,
/// overlap highlights included.
pub(super) async fn get_scene(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<SceneData>>, ApiError> {
    let mut app = MapApp::new(state.client);
    if !app.load_outlets().await {
        return Err(ApiError::new(
            req_id.0,
            "upstream_error",
            "Failed to load outlets. Please try again later.",
        ));
    }

    let data = SceneData {
        outlet_count: app.store().len(),
        overlap_count: app.store().overlaps().len(),
        scene: app.scene().clone(),
    };
    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Classifies and runs a search. `204` when no request was issued.
pub(super) async fn run_query(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(query): Path<String>,
) -> Result<Response, ApiError> {
    let Some(results) = route(&state.client, &query)
        .await
        .map_err(|e| map_client_error(req_id.0.clone(), &e))?
    else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let panel_html = search_results_html(&results.title, &results.outlets);
    Ok(Json(ApiResponse {
        data: QueryData {
            intent: results.intent,
            title: results.title,
            outlets: results.outlets,
            panel_html,
        },
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response())
}

pub(super) async fn get_detail(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(outlet_id): Path<i64>,
) -> Result<Json<ApiResponse<DetailData>>, ApiError> {
    let outlet = state
        .client
        .outlet(outlet_id)
        .await
        .map_err(|e| map_client_error(req_id.0.clone(), &e))?;

    let panel_html = outlet_detail_html(&outlet);
    Ok(Json(ApiResponse {
        data: DetailData { outlet, panel_html },
        meta: ResponseMeta::new(req_id.0),
    }))
}
