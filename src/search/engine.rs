//! Search orchestrator.
//!
//! Composes the predicate builder, the paginated fetch, the match count and
//! the facet aggregation into one search operation. The fetch and the count
//! have no data dependency and run concurrently; every store call is
//! bounded so a stalled store cannot hang a request. No transaction spans
//! the fetch/count/facet triple: marketplace browsing is read-mostly and a
//! slightly stale count is acceptable.

use anyhow::{anyhow, Result};
use std::future::Future;
use std::time::Duration;

use super::facets;
use super::types::{ListingResult, SearchResults, SuggestionType};
use crate::catalog::types::Listing;
use crate::catalog::CatalogStore;
use crate::geo::{distance_km, Point};
use crate::query::{Clause, Field, PageRequest, Predicate, SearchRequest, SortOrder};

pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub const FEATURED_MIN_RATING: f64 = 4.0;
pub const DEFAULT_FEATURED_LIMIT: usize = 10;
pub const MAX_FEATURED_LIMIT: usize = 50;

pub const SUGGESTION_LIMIT: usize = 10;
pub const MIN_SUGGESTION_QUERY: usize = 2;

/// Bound a store call to `STORE_TIMEOUT`.
pub(super) async fn bounded<T, F>(fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(STORE_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(anyhow!("store call timed out")),
    }
}

/// Execute a validated search request against the store.
pub async fn search_parts(
    store: &dyn CatalogStore,
    request: &SearchRequest,
) -> Result<SearchResults> {
    let predicate = request.predicate();

    let (listings, total_count) = {
        let (page, count) = tokio::join!(
            bounded(store.fetch_page(&predicate, request.sort, request.page)),
            bounded(store.count(&predicate)),
        );
        (page?, count?)
    };

    let facets = facets::aggregate(store, &predicate).await?;

    let page_size = request.page.page_size;
    let total_pages = total_count.div_ceil(page_size as u64);

    Ok(SearchResults {
        parts: listings
            .into_iter()
            .map(|l| annotate(l, request.origin))
            .collect(),
        total_count,
        page: request.page.page,
        page_size,
        total_pages,
        facets,
    })
}

/// Featured listings: visible parts from verified sellers rated at least
/// `FEATURED_MIN_RATING`, best-rated first.
pub async fn featured_parts(
    store: &dyn CatalogStore,
    limit: usize,
) -> Result<Vec<ListingResult>> {
    let predicate = Predicate::base().with(Clause::Range {
        field: Field::SellerRating,
        min: Some(FEATURED_MIN_RATING),
        max: None,
    });
    let page = PageRequest {
        page: 1,
        page_size: limit.clamp(1, MAX_FEATURED_LIMIT),
    };

    let listings = bounded(store.fetch_page(&predicate, SortOrder::Relevance, page)).await?;
    Ok(listings.into_iter().map(|l| annotate(l, None)).collect())
}

/// Autocomplete values for the search box. Queries shorter than two
/// characters answer with an empty list rather than an error.
pub async fn suggestions(
    store: &dyn CatalogStore,
    q: &str,
    kind: SuggestionType,
) -> Result<Vec<String>> {
    let q = q.trim();
    if q.chars().count() < MIN_SUGGESTION_QUERY {
        return Ok(Vec::new());
    }
    bounded(store.distinct_values(kind.field(), q, SUGGESTION_LIMIT)).await
}

fn annotate(listing: Listing, origin: Option<Point>) -> ListingResult {
    let distance = match (origin, listing.seller.coordinates) {
        (Some(from), Some(to)) => Some(distance_km(from, to)),
        _ => None,
    };
    ListingResult {
        part: listing.part,
        vehicle: listing.vehicle,
        seller: listing.seller,
        distance_km: distance,
    }
}
