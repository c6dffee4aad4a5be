//! Rollup reads over the raw event log.
//!
//! Aggregates are computed at read time by scanning typed event slices;
//! unlike the write side, a store failure here propagates to the caller.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::store::EventStore;
use super::types::{EventType, PopularSearch, Summary, TopPart};
use crate::catalog::CatalogStore;
use crate::query::ValidationError;

pub const DEFAULT_ROLLUP_LIMIT: usize = 10;

/// `<integer><unit>` with units `h`, `d`, `w` (e.g. `24h`, `7d`, `2w`).
pub fn parse_period(raw: &str) -> Result<Duration, ValidationError> {
    let raw = raw.trim();
    let err = || ValidationError(format!("Invalid period: {}", raw));

    // Split on the char boundary, not the last byte: the trailing character
    // may be multi-byte and caller-supplied.
    let (idx, unit) = raw.char_indices().last().ok_or_else(err)?;
    let amount: i64 = raw[..idx].parse().map_err(|_| err())?;
    if amount < 1 {
        return Err(err());
    }
    match unit {
        'h' => Ok(Duration::hours(amount)),
        'd' => Ok(Duration::days(amount)),
        'w' => Ok(Duration::weeks(amount)),
        _ => Err(err()),
    }
}

/// All-time event counts per type.
pub async fn summary(events: &dyn EventStore) -> Result<Summary> {
    Ok(Summary {
        part_views: events.count_of(EventType::PartView).await?,
        searches: events.count_of(EventType::Search).await?,
        seller_contacts: events.count_of(EventType::SellerContact).await?,
    })
}

/// Top `limit` parts by view count within the window, most viewed first.
/// Parts removed from the catalog keep their counts with no projection.
pub async fn top_parts(
    catalog: &dyn CatalogStore,
    events: &dyn EventStore,
    limit: usize,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<TopPart>> {
    let views = events.events_of_type(EventType::PartView, since).await?;

    let mut counts: HashMap<Uuid, u64> = HashMap::new();
    for event in &views {
        if let Some(part_id) = event.part_id {
            *counts.entry(part_id).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(Uuid, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);

    let mut top = Vec::with_capacity(ranked.len());
    for (part_id, view_count) in ranked {
        top.push(TopPart {
            part_id,
            view_count,
            part: catalog.part_brief(part_id).await?,
        });
    }
    Ok(top)
}

/// Top `limit` search queries by occurrence within the window. Queries are
/// lowercased and trimmed before grouping so "Engine Parts", "engine parts"
/// and "ENGINE PARTS" collapse into one bucket.
pub async fn popular_searches(
    events: &dyn EventStore,
    limit: usize,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<PopularSearch>> {
    let searches = events.events_of_type(EventType::Search, since).await?;

    let mut counts: HashMap<String, u64> = HashMap::new();
    for event in &searches {
        let Some(query) = event.metadata.get("query").and_then(|q| q.as_str()) else {
            continue;
        };
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        *counts.entry(normalized).or_insert(0) += 1;
    }

    let mut ranked: Vec<PopularSearch> = counts
        .into_iter()
        .map(|(query, search_count)| PopularSearch {
            query,
            search_count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.search_count
            .cmp(&a.search_count)
            .then_with(|| a.query.cmp(&b.query))
    });
    ranked.truncate(limit);
    Ok(ranked)
}
