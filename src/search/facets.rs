//! Facet aggregation.
//!
//! Computes the distribution counts the filter UI renders alongside search
//! results. All four dimensions are aggregated against the full active
//! predicate, so every displayed count reflects the result set the user is
//! currently looking at. The four group counts have no data dependency on
//! each other and run concurrently.

use anyhow::Result;

use super::engine::bounded;
use super::types::{FacetCount, Facets, PriceRangeCount};
use crate::catalog::store::FacetDimension;
use crate::catalog::CatalogStore;
use crate::query::Predicate;

pub async fn aggregate(store: &dyn CatalogStore, predicate: &Predicate) -> Result<Facets> {
    let (makes, conditions, prices, locations) = tokio::join!(
        bounded(store.group_count(predicate, FacetDimension::VehicleMake)),
        bounded(store.group_count(predicate, FacetDimension::Condition)),
        bounded(store.group_count(predicate, FacetDimension::PriceBucket)),
        bounded(store.group_count(predicate, FacetDimension::SellerProvince)),
    );

    Ok(Facets {
        makes: to_counts(makes?),
        conditions: to_counts(conditions?),
        price_ranges: prices?
            .into_iter()
            .map(|(range, count)| PriceRangeCount { range, count })
            .collect(),
        locations: to_counts(locations?),
        // Two-phase facet: models are fetched by the client per make.
        models: Vec::new(),
    })
}

fn to_counts(grouped: Vec<(String, u64)>) -> Vec<FacetCount> {
    grouped
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect()
}
