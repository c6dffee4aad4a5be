//! Analytics Module
//!
//! Best-effort usage telemetry for the marketplace: discrete events written
//! by browsing actions and the time-windowed rollups read by dashboards.
//!
//! ## Submodules
//! - **`tracker`**: Write path (part views, searches, seller contacts) with
//!   its deliberate soft-fail shape validation.
//! - **`rollups`**: Read path (summary, top parts, popular searches).
//! - **`store`**: The append-only `EventStore` seam and its in-memory
//!   implementation.
//! - **`handlers`**: HTTP request handlers.
//! - **`types`**: Event records and API DTOs.

pub mod handlers;
pub mod rollups;
pub mod store;
pub mod tracker;
pub mod types;


pub use store::{EventStore, MemoryEventStore};
pub use tracker::TrackOutcome;
pub use types::{AnalyticsEvent, EventType};
