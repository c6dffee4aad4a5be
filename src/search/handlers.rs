use axum::extract::Query;
use axum::Extension;
use serde::Deserialize;
use std::sync::Arc;

use super::engine::{self, DEFAULT_FEATURED_LIMIT};
use super::types::{ListingResult, SearchResults, SuggestionType};
use crate::api::{self, ApiResult, SEARCH_UNAVAILABLE};
use crate::catalog::CatalogStore;
use crate::query::{RawSearchParams, SearchRequest};

/// GET /parts/search
pub async fn handle_search(
    Query(raw): Query<RawSearchParams>,
    Extension(store): Extension<Arc<dyn CatalogStore>>,
) -> ApiResult<SearchResults> {
    let request = match SearchRequest::from_raw(raw) {
        Ok(request) => request,
        Err(e) => return api::bad_request(e),
    };

    match engine::search_parts(store.as_ref(), &request).await {
        Ok(results) => {
            tracing::debug!(
                total = results.total_count,
                page = results.page,
                "search completed"
            );
            api::ok(results)
        }
        Err(e) => {
            tracing::error!("search failed: {:#}", e);
            api::unavailable(SEARCH_UNAVAILABLE)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<String>,
}

/// GET /parts/featured
pub async fn handle_featured(
    Query(params): Query<FeaturedParams>,
    Extension(store): Extension<Arc<dyn CatalogStore>>,
) -> ApiResult<Vec<ListingResult>> {
    let limit = match params.limit.as_deref() {
        None | Some("") => DEFAULT_FEATURED_LIMIT,
        Some(raw) => match raw.parse::<usize>() {
            Ok(limit) if limit >= 1 => limit,
            _ => return api::bad_request("limit must be a positive integer"),
        },
    };

    match engine::featured_parts(store.as_ref(), limit).await {
        Ok(parts) => api::ok(parts),
        Err(e) => {
            tracing::error!("featured lookup failed: {:#}", e);
            api::unavailable(SEARCH_UNAVAILABLE)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /parts/suggestions
pub async fn handle_suggestions(
    Query(params): Query<SuggestionParams>,
    Extension(store): Extension<Arc<dyn CatalogStore>>,
) -> ApiResult<Vec<String>> {
    let kind = match params.kind.as_deref() {
        None | Some("") => SuggestionType::Parts,
        Some(raw) => match SuggestionType::parse(raw) {
            Some(kind) => kind,
            None => return api::bad_request(format!("Unknown suggestion type: {}", raw)),
        },
    };
    let q = params.q.unwrap_or_default();

    match engine::suggestions(store.as_ref(), &q, kind).await {
        Ok(values) => api::ok(values),
        Err(e) => {
            tracing::error!("suggestions failed: {:#}", e);
            api::unavailable(SEARCH_UNAVAILABLE)
        }
    }
}
