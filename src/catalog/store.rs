//! The store seam between the search core and whatever holds the catalog.
//!
//! Implementations lower the predicate IR into their native query form. The
//! crate ships an in-memory implementation (`memory.rs`); a relational
//! implementation would translate the same clauses into SQL.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::types::{Listing, PartBrief};
use crate::query::{PageRequest, Predicate, SortOrder};

/// Dimension a facet aggregation groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetDimension {
    VehicleMake,
    Condition,
    PriceBucket,
    SellerProvince,
}

/// Field the autocomplete endpoint draws distinct values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestField {
    PartName,
    VehicleMake,
    VehicleModel,
}

/// Fixed price facet buckets in ZAR. Lower bound inclusive; the upper bound
/// is inclusive per bucket and the buckets do not overlap.
pub struct PriceBucket {
    pub label: &'static str,
    pub min: f64,
    pub max: Option<f64>,
}

pub const PRICE_BUCKETS: &[PriceBucket] = &[
    PriceBucket {
        label: "0-1000",
        min: 0.0,
        max: Some(1000.0),
    },
    PriceBucket {
        label: "1000-5000",
        min: 1000.0,
        max: Some(5000.0),
    },
    PriceBucket {
        label: "5000-10000",
        min: 5000.0,
        max: Some(10000.0),
    },
    PriceBucket {
        label: "10000-25000",
        min: 10000.0,
        max: Some(25000.0),
    },
    PriceBucket {
        label: "25000+",
        min: 25000.0,
        max: None,
    },
];

/// Bucket label for a price, or `None` for prices outside every bucket
/// (negative prices). The first matching bucket wins, so boundary prices
/// land in the lower bucket.
pub fn price_bucket_label(price: f64) -> Option<&'static str> {
    PRICE_BUCKETS
        .iter()
        .find(|b| price >= b.min && b.max.map_or(true, |max| price <= max))
        .map(|b| b.label)
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// One page of matching listings in the requested sort order.
    async fn fetch_page(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        page: PageRequest,
    ) -> Result<Vec<Listing>>;

    /// Total number of listings matching the predicate.
    async fn count(&self, predicate: &Predicate) -> Result<u64>;

    /// Matching-listing counts grouped by one dimension. Only groups with a
    /// non-zero count are returned.
    async fn group_count(
        &self,
        predicate: &Predicate,
        dimension: FacetDimension,
    ) -> Result<Vec<(String, u64)>>;

    /// Up to `limit` distinct values of `field` among visible listings that
    /// contain `needle` (case-insensitive).
    async fn distinct_values(
        &self,
        field: SuggestField,
        needle: &str,
        limit: usize,
    ) -> Result<Vec<String>>;

    async fn part_exists(&self, id: Uuid) -> Result<bool>;

    async fn seller_exists(&self, id: Uuid) -> Result<bool>;

    /// Minimal projection for analytics joins; `None` when the part no
    /// longer exists (events may outlive their subject).
    async fn part_brief(&self, id: Uuid) -> Result<Option<PartBrief>>;
}
