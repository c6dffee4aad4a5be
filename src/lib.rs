//! PartPal Marketplace Search Core
//!
//! This library crate defines the core modules of the public marketplace
//! search service for used auto parts. It serves as the foundation for the
//! binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of loosely coupled subsystems:
//!
//! - **`api`**: The shared HTTP response envelope. Every endpoint wraps its
//!   payload in `{success, data?, error?, message?}`.
//! - **`geo`**: Great-circle distance math (Haversine) used to annotate
//!   search results with the distance to a seller's yard.
//! - **`query`**: Query-parameter validation and the predicate intermediate
//!   representation. Translates the flat filter keys of a search request
//!   into typed clauses any backing store can lower.
//! - **`catalog`**: The marketplace entities (parts, vehicles, sellers) and
//!   the `CatalogStore` seam, with an in-memory `DashMap`-backed
//!   implementation that evaluates predicates directly.
//! - **`search`**: The orchestrator. Composes predicate building, the
//!   paginated fetch, the match count, and facet aggregation into one
//!   search operation, plus the featured and autocomplete variants.
//! - **`analytics`**: Append-only event tracking (part views, searches,
//!   seller contacts) and the time-windowed rollups behind the seller
//!   dashboards.

pub mod analytics;
pub mod api;
pub mod catalog;
pub mod geo;
pub mod query;
pub mod search;
