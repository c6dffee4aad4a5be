use axum::extract::Query;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use super::rollups::{self, DEFAULT_ROLLUP_LIMIT};
use super::store::EventStore;
use super::tracker::{self, TrackOutcome};
use super::types::{
    PartViewRequest, PopularSearch, SearchTrackRequest, SellerContactRequest, Summary,
    TopPart, TrackResponse,
};
use crate::api::{self, ApiResult, ANALYTICS_UNAVAILABLE};
use crate::catalog::CatalogStore;

fn track_result(outcome: anyhow::Result<TrackOutcome>) -> ApiResult<TrackResponse> {
    match outcome {
        Ok(TrackOutcome::Recorded) => api::ok(TrackResponse { tracked: true }),
        Ok(TrackOutcome::Ignored) => api::ok_with_message(
            TrackResponse { tracked: false },
            "Event not tracked: invalid payload",
        ),
        Ok(TrackOutcome::UnknownPart) => api::not_found("Part not found"),
        Ok(TrackOutcome::UnknownSeller) => api::not_found("Seller not found"),
        Err(e) => {
            tracing::error!("tracking write failed: {:#}", e);
            api::unavailable(ANALYTICS_UNAVAILABLE)
        }
    }
}

/// POST /analytics/part-view
pub async fn handle_part_view(
    Extension(catalog): Extension<Arc<dyn CatalogStore>>,
    Extension(events): Extension<Arc<dyn EventStore>>,
    Json(request): Json<PartViewRequest>,
) -> ApiResult<TrackResponse> {
    track_result(tracker::track_part_view(catalog.as_ref(), events.as_ref(), request).await)
}

/// POST /analytics/search
pub async fn handle_search_event(
    Extension(events): Extension<Arc<dyn EventStore>>,
    Json(request): Json<SearchTrackRequest>,
) -> ApiResult<TrackResponse> {
    track_result(tracker::track_search(events.as_ref(), request).await)
}

/// POST /analytics/seller-contact
pub async fn handle_seller_contact(
    Extension(catalog): Extension<Arc<dyn CatalogStore>>,
    Extension(events): Extension<Arc<dyn EventStore>>,
    Json(request): Json<SellerContactRequest>,
) -> ApiResult<TrackResponse> {
    track_result(
        tracker::track_seller_contact(catalog.as_ref(), events.as_ref(), request).await,
    )
}

/// GET /analytics/summary
pub async fn handle_summary(
    Extension(events): Extension<Arc<dyn EventStore>>,
) -> ApiResult<Summary> {
    match rollups::summary(events.as_ref()).await {
        Ok(summary) => api::ok(summary),
        Err(e) => {
            tracing::error!("summary rollup failed: {:#}", e);
            api::unavailable(ANALYTICS_UNAVAILABLE)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RollupParams {
    pub limit: Option<String>,
    pub period: Option<String>,
}

fn parse_rollup_params(
    params: &RollupParams,
) -> Result<(usize, Option<chrono::DateTime<chrono::Utc>>), String> {
    let limit = match params.limit.as_deref() {
        None | Some("") => DEFAULT_ROLLUP_LIMIT,
        Some(raw) => match raw.parse::<usize>() {
            Ok(limit) if limit >= 1 => limit,
            _ => return Err("limit must be a positive integer".to_string()),
        },
    };
    let since = match params.period.as_deref() {
        None | Some("") => None,
        Some(raw) => {
            let duration = rollups::parse_period(raw).map_err(|e| e.to_string())?;
            Some(chrono::Utc::now() - duration)
        }
    };
    Ok((limit, since))
}

/// GET /analytics/top-parts
pub async fn handle_top_parts(
    Query(params): Query<RollupParams>,
    Extension(catalog): Extension<Arc<dyn CatalogStore>>,
    Extension(events): Extension<Arc<dyn EventStore>>,
) -> ApiResult<Vec<TopPart>> {
    let (limit, since) = match parse_rollup_params(&params) {
        Ok(parsed) => parsed,
        Err(e) => return api::bad_request(e),
    };

    match rollups::top_parts(catalog.as_ref(), events.as_ref(), limit, since).await {
        Ok(top) => api::ok(top),
        Err(e) => {
            tracing::error!("top-parts rollup failed: {:#}", e);
            api::unavailable(ANALYTICS_UNAVAILABLE)
        }
    }
}

/// GET /analytics/popular-searches
pub async fn handle_popular_searches(
    Query(params): Query<RollupParams>,
    Extension(events): Extension<Arc<dyn EventStore>>,
) -> ApiResult<Vec<PopularSearch>> {
    let (limit, since) = match parse_rollup_params(&params) {
        Ok(parsed) => parsed,
        Err(e) => return api::bad_request(e),
    };

    match rollups::popular_searches(events.as_ref(), limit, since).await {
        Ok(popular) => api::ok(popular),
        Err(e) => {
            tracing::error!("popular-searches rollup failed: {:#}", e);
            api::unavailable(ANALYTICS_UNAVAILABLE)
        }
    }
}
