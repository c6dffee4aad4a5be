//! In-memory catalog store.
//!
//! Backs the service with `DashMap` collections and lowers the predicate IR
//! by evaluating clauses directly against joined listing rows. Serves both
//! as the reference store implementation and as the test double for the
//! search core.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use uuid::Uuid;

use super::store::{price_bucket_label, CatalogStore, FacetDimension, SuggestField};
use super::types::{Category, CatalogFile, Listing, Part, PartBrief, Seller, Vehicle};
use crate::query::predicate::{status_name, Clause, Field, Predicate, Scalar};
use crate::query::{params::seller_type_name, PageRequest, SortOrder};

#[derive(Default)]
pub struct MemoryCatalog {
    parts: DashMap<Uuid, Part>,
    vehicles: DashMap<Uuid, Vehicle>,
    sellers: DashMap<Uuid, Seller>,
    categories: DashMap<Uuid, Category>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_part(&self, part: Part) {
        self.parts.insert(part.id, part);
    }

    pub fn insert_vehicle(&self, vehicle: Vehicle) {
        self.vehicles.insert(vehicle.id, vehicle);
    }

    pub fn insert_seller(&self, seller: Seller) {
        self.sellers.insert(seller.id, seller);
    }

    pub fn insert_category(&self, category: Category) {
        self.categories.insert(category.id, category);
    }

    /// Bulk-load a seed file. Later entries overwrite earlier ones with the
    /// same id.
    pub fn load(&self, file: CatalogFile) {
        for seller in file.sellers {
            self.insert_seller(seller);
        }
        for vehicle in file.vehicles {
            self.insert_vehicle(vehicle);
        }
        for part in file.parts {
            self.insert_part(part);
        }
        for category in file.categories {
            self.insert_category(category);
        }
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn seller_count(&self) -> usize {
        self.sellers.len()
    }

    /// All listings matching the predicate, unordered. Parts whose vehicle
    /// or seller record is missing are skipped rather than surfaced as
    /// partial rows.
    fn select(&self, predicate: &Predicate) -> Vec<Listing> {
        let mut matches = Vec::new();
        for entry in self.parts.iter() {
            let part = entry.value();
            let vehicle = match self.vehicles.get(&part.vehicle_id) {
                Some(v) => v.value().clone(),
                None => continue,
            };
            let seller = match self.sellers.get(&part.seller_id) {
                Some(s) => s.value().clone(),
                None => continue,
            };
            let listing = Listing {
                part: part.clone(),
                vehicle,
                seller,
            };
            if predicate.clauses().iter().all(|c| clause_matches(&listing, c)) {
                matches.push(listing);
            }
        }
        matches
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn fetch_page(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        page: PageRequest,
    ) -> Result<Vec<Listing>> {
        let mut listings = self.select(predicate);
        sort_listings(&mut listings, sort);
        Ok(listings
            .into_iter()
            .skip(page.offset())
            .take(page.page_size)
            .collect())
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64> {
        Ok(self.select(predicate).len() as u64)
    }

    async fn group_count(
        &self,
        predicate: &Predicate,
        dimension: FacetDimension,
    ) -> Result<Vec<(String, u64)>> {
        let listings = self.select(predicate);

        if dimension == FacetDimension::PriceBucket {
            // Bucket order is fixed by the bucket table, not by count.
            let mut counts: HashMap<&str, u64> = HashMap::new();
            for listing in &listings {
                if let Some(label) = price_bucket_label(listing.part.price) {
                    *counts.entry(label).or_insert(0) += 1;
                }
            }
            return Ok(super::store::PRICE_BUCKETS
                .iter()
                .filter_map(|b| counts.get(b.label).map(|c| (b.label.to_string(), *c)))
                .collect());
        }

        let mut counts: HashMap<String, u64> = HashMap::new();
        for listing in &listings {
            let value = match dimension {
                FacetDimension::VehicleMake => listing.vehicle.make.clone(),
                FacetDimension::Condition => listing.part.condition.as_str().to_string(),
                FacetDimension::SellerProvince => listing.seller.province.clone(),
                FacetDimension::PriceBucket => unreachable!(),
            };
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut grouped: Vec<(String, u64)> = counts.into_iter().collect();
        grouped.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(grouped)
    }

    async fn distinct_values(
        &self,
        field: SuggestField,
        needle: &str,
        limit: usize,
    ) -> Result<Vec<String>> {
        let needle = needle.to_lowercase();
        let mut values = Vec::new();

        for listing in self.select(&Predicate::base()) {
            let value = match field {
                SuggestField::PartName => listing.part.name,
                SuggestField::VehicleMake => listing.vehicle.make,
                SuggestField::VehicleModel => listing.vehicle.model,
            };
            if value.to_lowercase().contains(&needle) && !values.contains(&value) {
                values.push(value);
            }
        }

        values.sort();
        values.truncate(limit);
        Ok(values)
    }

    async fn part_exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.parts.contains_key(&id))
    }

    async fn seller_exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.sellers.contains_key(&id))
    }

    async fn part_brief(&self, id: Uuid) -> Result<Option<PartBrief>> {
        Ok(self.parts.get(&id).map(|p| PartBrief::from(p.value())))
    }
}

pub fn sort_listings(listings: &mut [Listing], sort: SortOrder) {
    match sort {
        SortOrder::Relevance => listings.sort_by(|a, b| {
            b.seller
                .rating
                .total_cmp(&a.seller.rating)
                .then_with(|| b.part.created_at.cmp(&a.part.created_at))
        }),
        SortOrder::PriceLow => {
            listings.sort_by(|a, b| a.part.price.total_cmp(&b.part.price))
        }
        SortOrder::PriceHigh => {
            listings.sort_by(|a, b| b.part.price.total_cmp(&a.part.price))
        }
        SortOrder::Newest => {
            listings.sort_by(|a, b| b.part.created_at.cmp(&a.part.created_at))
        }
        SortOrder::Condition => listings.sort_by(|a, b| {
            b.part
                .condition
                .rank()
                .cmp(&a.part.condition.rank())
                .then_with(|| b.part.created_at.cmp(&a.part.created_at))
        }),
    }
}

fn clause_matches(listing: &Listing, clause: &Clause) -> bool {
    match clause {
        Clause::Substring { field, value } => text_value(listing, *field)
            .map(|t| t.to_lowercase().contains(&value.to_lowercase()))
            .unwrap_or(false),
        Clause::Equals { field, value } => match value {
            Scalar::Text(expected) => {
                text_value(listing, *field).map_or(false, |t| t == *expected)
            }
            Scalar::Int(expected) => int_value(listing, *field) == Some(*expected),
            Scalar::Bool(expected) => bool_value(listing, *field) == Some(*expected),
        },
        Clause::Range { field, min, max } => number_value(listing, *field)
            .map(|n| min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m))
            .unwrap_or(false),
        Clause::OneOf { field, values } => {
            text_value(listing, *field).map_or(false, |t| values.iter().any(|v| *v == t))
        }
        Clause::AnyOf(clauses) => clauses.iter().any(|c| clause_matches(listing, c)),
    }
}

fn text_value(listing: &Listing, field: Field) -> Option<String> {
    match field {
        Field::PartName => Some(listing.part.name.clone()),
        Field::PartDescription => Some(listing.part.description.clone()),
        Field::PartNumber => listing.part.part_number.clone(),
        Field::PartCondition => Some(listing.part.condition.as_str().to_string()),
        Field::PartStatus => Some(status_name(listing.part.status).to_string()),
        Field::VehicleMake => Some(listing.vehicle.make.clone()),
        Field::VehicleModel => Some(listing.vehicle.model.clone()),
        Field::SellerProvince => Some(listing.seller.province.clone()),
        Field::SellerCity => Some(listing.seller.city.clone()),
        Field::SellerType => Some(seller_type_name(listing.seller.business_type).to_string()),
        _ => None,
    }
}

fn number_value(listing: &Listing, field: Field) -> Option<f64> {
    match field {
        Field::PartPrice => Some(listing.part.price),
        Field::SellerRating => Some(listing.seller.rating),
        Field::VehicleYear => Some(listing.vehicle.year as f64),
        _ => None,
    }
}

fn int_value(listing: &Listing, field: Field) -> Option<i64> {
    match field {
        Field::VehicleYear => Some(listing.vehicle.year as i64),
        _ => None,
    }
}

fn bool_value(listing: &Listing, field: Field) -> Option<bool> {
    match field {
        Field::PartListed => Some(listing.part.is_listed_on_marketplace),
        Field::SellerVerified => Some(listing.seller.is_verified),
        _ => None,
    }
}
