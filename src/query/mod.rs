//! Query Module
//!
//! Parameter validation and the predicate intermediate representation.
//! Raw filter keys are parsed into a typed `SearchRequest` at the boundary;
//! unknown or malformed values are rejected before any store is touched.

pub mod params;
pub mod predicate;


pub use params::{PageRequest, RawSearchParams, SearchRequest, SortOrder, ValidationError};
pub use predicate::{Clause, Field, Predicate, Scalar};
