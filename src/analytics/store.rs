//! Append-only event store seam.
//!
//! Writes are inserts with no update contention; rollup reads never block
//! writers beyond the brief lock on the in-memory implementation. Events
//! are never updated or deleted.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::RwLock;

use super::types::{AnalyticsEvent, EventType};

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn append(&self, event: AnalyticsEvent) -> Result<()>;

    /// All-time count of events of one type.
    async fn count_of(&self, event_type: EventType) -> Result<u64>;

    /// Events of one type, optionally restricted to `timestamp >= since`.
    async fn events_of_type(
        &self,
        event_type: EventType,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalyticsEvent>>;
}

#[derive(Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<AnalyticsEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn append(&self, event: AnalyticsEvent) -> Result<()> {
        self.events
            .write()
            .map_err(|_| anyhow::anyhow!("event store lock poisoned"))?
            .push(event);
        Ok(())
    }

    async fn count_of(&self, event_type: EventType) -> Result<u64> {
        let events = self
            .events
            .read()
            .map_err(|_| anyhow::anyhow!("event store lock poisoned"))?;
        Ok(events.iter().filter(|e| e.event_type == event_type).count() as u64)
    }

    async fn events_of_type(
        &self,
        event_type: EventType,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalyticsEvent>> {
        let events = self
            .events
            .read()
            .map_err(|_| anyhow::anyhow!("event store lock poisoned"))?;
        Ok(events
            .iter()
            .filter(|e| e.event_type == event_type)
            .filter(|e| since.map_or(true, |cutoff| e.timestamp >= cutoff))
            .cloned()
            .collect())
    }
}
