//! Catalog Module
//!
//! The marketplace entities (parts, vehicles, sellers, categories) and the
//! store seam the search core queries them through.
//!
//! ## Core Concepts
//! - **Entities**: Seller 1-N Vehicle 1-N Part; a Part optionally belongs
//!   to a Category. Search always operates on the joined `Listing` row.
//! - **Seam**: `CatalogStore` is the injected capability; components never
//!   reach for a global store client.
//! - **Lowering**: Each implementation lowers the predicate IR itself. The
//!   bundled `MemoryCatalog` evaluates clauses directly over `DashMap`s.

pub mod memory;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use memory::MemoryCatalog;
pub use store::{CatalogStore, FacetDimension, SuggestField};
pub use types::*;
