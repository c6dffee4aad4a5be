//! Tracking writes.
//!
//! Failure severity is deliberately asymmetric here and must stay that way:
//! a payload whose own shape is invalid (missing or malformed required
//! field) soft-fails with `Ignored`, which the HTTP layer reports as
//! success with `tracked: false`, so client-side telemetry can never break
//! the user-facing action it is attached to. A well-formed payload that
//! references a part or seller that does not exist is a hard not-found
//! failure. Do not "fix" this into uniform hard failures.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use super::store::EventStore;
use super::types::{
    AnalyticsEvent, EventType, PartViewRequest, SearchTrackRequest, SellerContactRequest,
};
use crate::catalog::CatalogStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    Recorded,
    /// Shape validation failed; the event was dropped, the call succeeds.
    Ignored,
    UnknownPart,
    UnknownSeller,
}

pub async fn track_part_view(
    catalog: &dyn CatalogStore,
    events: &dyn EventStore,
    request: PartViewRequest,
) -> Result<TrackOutcome> {
    let Some(part_id) = parse_uuid(&request.part_id) else {
        return Ok(TrackOutcome::Ignored);
    };
    let Some(timestamp) = resolve_timestamp(&request.timestamp) else {
        return Ok(TrackOutcome::Ignored);
    };

    if !catalog.part_exists(part_id).await? {
        return Ok(TrackOutcome::UnknownPart);
    }

    events
        .append(AnalyticsEvent {
            id: Uuid::new_v4(),
            event_type: EventType::PartView,
            part_id: Some(part_id),
            seller_id: None,
            metadata: json!({}),
            session_id: request.session_id,
            user_agent: request.user_agent,
            timestamp,
        })
        .await?;

    Ok(TrackOutcome::Recorded)
}

pub async fn track_search(
    events: &dyn EventStore,
    request: SearchTrackRequest,
) -> Result<TrackOutcome> {
    let (Some(query), Some(filters), Some(results_count)) =
        (request.query, request.filters, request.results_count)
    else {
        return Ok(TrackOutcome::Ignored);
    };
    let Some(timestamp) = resolve_timestamp(&request.timestamp) else {
        return Ok(TrackOutcome::Ignored);
    };

    events
        .append(AnalyticsEvent {
            id: Uuid::new_v4(),
            event_type: EventType::Search,
            part_id: None,
            seller_id: None,
            metadata: json!({
                "query": query,
                "filters": filters,
                "resultsCount": results_count,
            }),
            session_id: request.session_id,
            user_agent: None,
            timestamp,
        })
        .await?;

    Ok(TrackOutcome::Recorded)
}

pub async fn track_seller_contact(
    catalog: &dyn CatalogStore,
    events: &dyn EventStore,
    request: SellerContactRequest,
) -> Result<TrackOutcome> {
    let Some(seller_id) = parse_uuid(&request.seller_id) else {
        return Ok(TrackOutcome::Ignored);
    };
    let Some(part_id) = parse_uuid(&request.part_id) else {
        return Ok(TrackOutcome::Ignored);
    };
    let Some(contact_method) = request
        .contact_method
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
    else {
        return Ok(TrackOutcome::Ignored);
    };
    let Some(timestamp) = resolve_timestamp(&request.timestamp) else {
        return Ok(TrackOutcome::Ignored);
    };

    if !catalog.seller_exists(seller_id).await? {
        return Ok(TrackOutcome::UnknownSeller);
    }
    if !catalog.part_exists(part_id).await? {
        return Ok(TrackOutcome::UnknownPart);
    }

    events
        .append(AnalyticsEvent {
            id: Uuid::new_v4(),
            event_type: EventType::SellerContact,
            part_id: Some(part_id),
            seller_id: Some(seller_id),
            metadata: json!({ "contactMethod": contact_method }),
            session_id: request.session_id,
            user_agent: request.user_agent,
            timestamp,
        })
        .await?;

    Ok(TrackOutcome::Recorded)
}

fn parse_uuid(raw: &Option<String>) -> Option<Uuid> {
    raw.as_deref().and_then(|s| Uuid::parse_str(s.trim()).ok())
}

/// Caller-supplied ISO-8601 timestamp, or ingestion time when absent.
/// An unparseable override is a shape failure, so `None` here means drop.
fn resolve_timestamp(raw: &Option<String>) -> Option<DateTime<Utc>> {
    match raw.as_deref() {
        None => Some(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}
