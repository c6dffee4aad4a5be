use serde::Serialize;

use crate::catalog::store::SuggestField;
use crate::catalog::types::{Part, Seller, Vehicle};

/// A single facet count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRangeCount {
    pub range: String,
    pub count: u64,
}

/// Facet breakdowns rendered as filter affordances by the marketplace UI.
///
/// `models` is intentionally always empty: the make x model cross product is
/// too wide to compute on every search, so the client fetches models with a
/// follow-up suggestions call once a make is selected.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub makes: Vec<FacetCount>,
    pub conditions: Vec<FacetCount>,
    pub price_ranges: Vec<PriceRangeCount>,
    pub locations: Vec<FacetCount>,
    pub models: Vec<FacetCount>,
}

/// One search hit: the part with its joined vehicle and seller projections,
/// plus the distance to the seller's yard when the caller supplied a
/// position and the seller has coordinates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResult {
    pub part: Part,
    pub vehicle: Vehicle,
    pub seller: Seller,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub parts: Vec<ListingResult>,
    pub total_count: u64,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: u64,
    pub facets: Facets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionType {
    Parts,
    Makes,
    Models,
}

impl SuggestionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "parts" => Some(SuggestionType::Parts),
            "makes" => Some(SuggestionType::Makes),
            "models" => Some(SuggestionType::Models),
            _ => None,
        }
    }

    pub fn field(self) -> SuggestField {
        match self {
            SuggestionType::Parts => SuggestField::PartName,
            SuggestionType::Makes => SuggestField::VehicleMake,
            SuggestionType::Models => SuggestField::VehicleModel,
        }
    }
}
