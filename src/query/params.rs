//! Search parameter parsing and validation.
//!
//! Every recognized filter key arrives as an optional string and is parsed
//! into its typed form before any predicate is built. Malformed numerics and
//! unknown enum values are rejected here, so the stores only ever see
//! well-formed predicates.

use serde::Deserialize;
use std::fmt;

use crate::catalog::types::{Condition, SellerType};
use crate::geo::Point;
use crate::query::predicate::{Clause, Field, Predicate, Scalar};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Raw query string of `GET /parts/search`, exactly as the client sent it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchParams {
    pub q: Option<String>,
    pub part_name: Option<String>,
    pub part_number: Option<String>,
    /// Comma-separated list of condition names.
    pub condition: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    /// Comma-separated list of seller business types.
    pub seller_type: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Seller rating descending, newest listing as tiebreak.
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    Newest,
    /// Condition ordinal descending, NEW first.
    Condition,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relevance" => Some(SortOrder::Relevance),
            "price_low" => Some(SortOrder::PriceLow),
            "price_high" => Some(SortOrder::PriceHigh),
            "newest" => Some(SortOrder::Newest),
            "condition" => Some(SortOrder::Condition),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

/// A caller error detected before any store access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ValidationError {}

/// The validated, typed form of a search request.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub text: Option<String>,
    pub part_name: Option<String>,
    pub part_number: Option<String>,
    pub conditions: Vec<Condition>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub seller_types: Vec<SellerType>,
    pub sort: SortOrder,
    pub page: PageRequest,
    /// Caller position used to annotate results with distance to the yard.
    /// Not a filter: supplying only lat/lng does not make a request valid.
    pub origin: Option<Point>,
}

impl SearchRequest {
    pub fn from_raw(raw: RawSearchParams) -> Result<Self, ValidationError> {
        let mut req = SearchRequest::default();
        let mut has_filter = false;

        if let Some(q) = non_empty(&raw.q) {
            req.text = Some(q);
            has_filter = true;
        }
        if let Some(name) = non_empty(&raw.part_name) {
            req.part_name = Some(name);
            has_filter = true;
        }
        if let Some(number) = non_empty(&raw.part_number) {
            req.part_number = Some(number);
            has_filter = true;
        }
        if let Some(list) = non_empty(&raw.condition) {
            for item in list.split(',') {
                let condition = Condition::parse(item)
                    .ok_or_else(|| ValidationError(format!("Unknown condition: {}", item.trim())))?;
                req.conditions.push(condition);
            }
            has_filter = true;
        }
        if let Some(value) = non_empty(&raw.min_price) {
            req.min_price = Some(parse_number("minPrice", &value)?);
            has_filter = true;
        }
        if let Some(value) = non_empty(&raw.max_price) {
            req.max_price = Some(parse_number("maxPrice", &value)?);
            has_filter = true;
        }
        if let Some(value) = non_empty(&raw.year) {
            req.year = Some(parse_int("year", &value)?);
            has_filter = true;
        }
        if let Some(make) = non_empty(&raw.make) {
            req.make = Some(make);
            has_filter = true;
        }
        if let Some(model) = non_empty(&raw.model) {
            req.model = Some(model);
            has_filter = true;
        }
        if let Some(province) = non_empty(&raw.province) {
            req.province = Some(province);
            has_filter = true;
        }
        if let Some(city) = non_empty(&raw.city) {
            req.city = Some(city);
            has_filter = true;
        }
        if let Some(list) = non_empty(&raw.seller_type) {
            for item in list.split(',') {
                let seller_type = SellerType::parse(item).ok_or_else(|| {
                    ValidationError(format!("Unknown seller type: {}", item.trim()))
                })?;
                req.seller_types.push(seller_type);
            }
            has_filter = true;
        }

        if !has_filter {
            return Err(ValidationError(
                "At least one search filter is required".to_string(),
            ));
        }

        if let Some(sort) = non_empty(&raw.sort_by) {
            req.sort = SortOrder::parse(&sort)
                .ok_or_else(|| ValidationError(format!("Unknown sort order: {}", sort)))?;
        }

        if let Some(value) = non_empty(&raw.page) {
            let page = parse_int("page", &value)?;
            if page < 1 {
                return Err(ValidationError("page must be at least 1".to_string()));
            }
            req.page.page = page as usize;
        }
        if let Some(value) = non_empty(&raw.page_size) {
            let size = parse_int("pageSize", &value)?;
            if size < 1 {
                return Err(ValidationError("pageSize must be at least 1".to_string()));
            }
            req.page.page_size = (size as usize).min(MAX_PAGE_SIZE);
        }

        req.origin = parse_origin(&raw)?;

        Ok(req)
    }

    /// Lower the validated filters into the predicate IR, on top of the
    /// non-negotiable marketplace visibility clauses.
    pub fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::base();

        if let Some(text) = &self.text {
            predicate.push(Clause::AnyOf(vec![
                substring(Field::PartName, text),
                substring(Field::PartDescription, text),
                substring(Field::PartNumber, text),
            ]));
        }
        if let Some(name) = &self.part_name {
            predicate.push(substring(Field::PartName, name));
        }
        if let Some(number) = &self.part_number {
            predicate.push(Clause::Equals {
                field: Field::PartNumber,
                value: Scalar::Text(number.clone()),
            });
        }
        if !self.conditions.is_empty() {
            predicate.push(Clause::OneOf {
                field: Field::PartCondition,
                values: self.conditions.iter().map(|c| c.as_str().to_string()).collect(),
            });
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            predicate.push(Clause::Range {
                field: Field::PartPrice,
                min: self.min_price,
                max: self.max_price,
            });
        }
        if let Some(year) = self.year {
            predicate.push(Clause::Equals {
                field: Field::VehicleYear,
                value: Scalar::Int(year as i64),
            });
        }
        if let Some(make) = &self.make {
            predicate.push(substring(Field::VehicleMake, make));
        }
        if let Some(model) = &self.model {
            predicate.push(substring(Field::VehicleModel, model));
        }
        if let Some(province) = &self.province {
            predicate.push(substring(Field::SellerProvince, province));
        }
        if let Some(city) = &self.city {
            predicate.push(substring(Field::SellerCity, city));
        }
        if !self.seller_types.is_empty() {
            predicate.push(Clause::OneOf {
                field: Field::SellerType,
                values: self
                    .seller_types
                    .iter()
                    .map(|t| seller_type_name(*t).to_string())
                    .collect(),
            });
        }

        predicate
    }
}

pub fn seller_type_name(seller_type: SellerType) -> &'static str {
    match seller_type {
        SellerType::ScrapYard => "SCRAP_YARD",
        SellerType::Dismantler => "DISMANTLER",
        SellerType::Private => "PRIVATE",
    }
}

fn substring(field: Field, value: &str) -> Clause {
    Clause::Substring {
        field,
        value: value.to_string(),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_number(name: &str, value: &str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError(format!("{} must be a number", name)))
}

fn parse_int(name: &str, value: &str) -> Result<i32, ValidationError> {
    value
        .parse::<i32>()
        .map_err(|_| ValidationError(format!("{} must be an integer", name)))
}

fn parse_origin(raw: &RawSearchParams) -> Result<Option<Point>, ValidationError> {
    match (non_empty(&raw.lat), non_empty(&raw.lng)) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let lat = parse_number("lat", &lat)?;
            let lng = parse_number("lng", &lng)?;
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ValidationError("lat must be within [-90, 90]".to_string()));
            }
            if !(-180.0..=180.0).contains(&lng) {
                return Err(ValidationError("lng must be within [-180, 180]".to_string()));
            }
            Ok(Some(Point { lat, lng }))
        }
        _ => Err(ValidationError(
            "lat and lng must be supplied together".to_string(),
        )),
    }
}
