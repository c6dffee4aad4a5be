//! Search Service Module
//!
//! The core component of the public marketplace: turns free-text queries
//! plus structured filters into a paginated, sorted, faceted result set.
//!
//! ## Responsibilities
//! - **Orchestration**: Validate the request, build the predicate, run the
//!   paginated fetch and the match count concurrently, aggregate facets,
//!   and merge everything into one response.
//! - **Facets**: Distribution counts (make, condition, price bucket,
//!   province) driving the filter UI.
//! - **Variants**: The featured-parts strip and search-box autocomplete.
//! - **API**: HTTP request handlers for the Axum web server.
//!
//! ## Submodules
//! - **`engine`**: Orchestration and the store-call timeout bound.
//! - **`facets`**: Facet aggregation against the active predicate.
//! - **`handlers`**: HTTP request handlers.
//! - **`types`**: Data Transfer Objects (DTOs) for API communication.

pub mod engine;
pub mod facets;
pub mod handlers;
pub mod types;
