use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    New,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Condition {
    /// Ordinal used by the `condition` sort order: NEW ranks highest.
    pub fn rank(self) -> u8 {
        match self {
            Condition::New => 4,
            Condition::Excellent => 3,
            Condition::Good => 2,
            Condition::Fair => 1,
            Condition::Poor => 0,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NEW" => Some(Condition::New),
            "EXCELLENT" => Some(Condition::Excellent),
            "GOOD" => Some(Condition::Good),
            "FAIR" => Some(Condition::Fair),
            "POOR" => Some(Condition::Poor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Condition::New => "NEW",
            Condition::Excellent => "EXCELLENT",
            Condition::Good => "GOOD",
            Condition::Fair => "FAIR",
            Condition::Poor => "POOR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartStatus {
    Available,
    Reserved,
    Sold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellerType {
    ScrapYard,
    Dismantler,
    Private,
}

impl SellerType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SCRAP_YARD" => Some(SellerType::ScrapYard),
            "DISMANTLER" => Some(SellerType::Dismantler),
            "PRIVATE" => Some(SellerType::Private),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub part_number: Option<String>,
    pub description: String,
    pub condition: Condition,
    pub price: f64,
    pub currency: String,
    pub status: PartStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub is_listed_on_marketplace: bool,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub vin: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub engine_size: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub mileage: Option<i32>,
    pub condition: Condition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    pub business_type: SellerType,
    pub province: String,
    pub city: String,
    #[serde(default)]
    pub coordinates: Option<Point>,
    pub is_verified: bool,
    pub rating: f64,
    pub total_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub is_active: bool,
}

/// The joined Part x Vehicle x Seller row search operates on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub part: Part,
    pub vehicle: Vehicle,
    pub seller: Seller,
}

/// Minimal part projection joined onto analytics rollups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartBrief {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub condition: Condition,
}

impl From<&Part> for PartBrief {
    fn from(part: &Part) -> Self {
        Self {
            id: part.id,
            name: part.name.clone(),
            price: part.price,
            condition: part.condition,
        }
    }
}

/// On-disk seed format accepted by `MemoryCatalog::load`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub categories: Vec<Category>,
}
