use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::types::PartBrief;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    PartView,
    Search,
    SellerContact,
}

/// One append-only telemetry record. Part/seller references are loose by
/// design: an event may outlive the entity it points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub event_type: EventType,
    #[serde(default)]
    pub part_id: Option<Uuid>,
    #[serde(default)]
    pub seller_id: Option<Uuid>,
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// POST /analytics/part-view body. Every field is optional at the wire
/// level; required-field checks happen in the tracker so a malformed body
/// soft-fails instead of erroring.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartViewRequest {
    pub part_id: Option<String>,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
    /// ISO-8601 override, stored verbatim when supplied (backfill/testing).
    pub timestamp: Option<String>,
}

/// POST /analytics/search body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTrackRequest {
    pub query: Option<String>,
    pub filters: Option<serde_json::Value>,
    pub results_count: Option<i64>,
    pub session_id: Option<String>,
    pub timestamp: Option<String>,
}

/// POST /analytics/seller-contact body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerContactRequest {
    pub seller_id: Option<String>,
    pub part_id: Option<String>,
    pub contact_method: Option<String>,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackResponse {
    pub tracked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub part_views: u64,
    pub searches: u64,
    pub seller_contacts: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPart {
    pub part_id: Uuid,
    pub view_count: u64,
    /// `None` when the part has since been removed from the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<PartBrief>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularSearch {
    pub query: String,
    pub search_count: u64,
}
