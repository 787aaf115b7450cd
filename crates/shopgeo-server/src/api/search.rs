use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use shopgeo_core::{Coordinate, CoreError};
use shopgeo_index::{SearchQuery, TagFilter};

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta, SearchSettings};

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Meters.
    pub radius: Option<f64>,
    pub limit: Option<i64>,
    /// Comma-separated tag ids.
    pub tags: Option<String>,
}

impl SearchParams {
    /// Applies defaults and converts to an engine query. The radius goes
    /// from meters to kilometers here.
    fn into_query(self, settings: &SearchSettings) -> Result<SearchQuery, CoreError> {
        let center = Coordinate::new(self.lat.unwrap_or(0.0), self.lng.unwrap_or(0.0));
        center.validate()?;

        let radius_m = self.radius.unwrap_or(settings.default_radius_m);
        let query = SearchQuery::new(
            center,
            radius_m / 1000.0,
            normalize_limit(self.limit, settings),
        );

        Ok(match self.tags.as_deref().map(TagFilter::parse_csv) {
            Some(filter) if !filter.is_empty() => query.with_tags(filter),
            _ => query,
        })
    }
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "validation_error", rejection.body_text())
    })?;

    let query = params
        .into_query(&state.search)
        .map_err(|e| map_core_error(req_id.0.clone(), &e))?;
    let results = state
        .engine
        .search(&query)
        .map_err(|e| map_core_error(req_id.0.clone(), &e))?;

    tracing::debug!(
        lat = query.center.lat,
        lng = query.center.lng,
        radius_km = query.radius_km,
        limit = query.limit,
        count = results.count,
        "search served"
    );

    Ok(Json(ApiResponse {
        data: results,
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response())
}

fn map_core_error(request_id: String, error: &CoreError) -> ApiError {
    match error {
        CoreError::InvalidQuery(message) => {
            ApiError::new(request_id, "validation_error", message.clone())
        }
        other => {
            tracing::error!(error = %other, "search failed");
            ApiError::new(request_id, "internal_error", "search failed")
        }
    }
}
