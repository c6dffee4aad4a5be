//! Predicate intermediate representation.
//!
//! A `Predicate` is a conjunction of typed clauses over the joined
//! Part/Vehicle/Seller row. It carries no knowledge of any particular store;
//! each `CatalogStore` implementation lowers the clauses into its native
//! query form (the in-memory store evaluates them directly, a SQL store
//! would translate them into WHERE fragments).

use crate::catalog::types::PartStatus;

/// Addressable column of the joined listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PartName,
    PartDescription,
    PartNumber,
    PartCondition,
    PartPrice,
    PartStatus,
    PartListed,
    VehicleYear,
    VehicleMake,
    VehicleModel,
    SellerProvince,
    SellerCity,
    SellerType,
    SellerVerified,
    SellerRating,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Case-insensitive substring match on a text field.
    Substring { field: Field, value: String },
    /// Exact equality.
    Equals { field: Field, value: Scalar },
    /// Inclusive numeric range; either side may be open.
    Range {
        field: Field,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Set membership over canonical enum names.
    OneOf { field: Field, values: Vec<String> },
    /// Disjunction group: matches if any inner clause matches. Used for the
    /// free-text `q` filter across name, description and part number.
    AnyOf(Vec<Clause>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// The marketplace visibility contract. Applied to every public query
    /// regardless of caller-supplied filters: listed, available, and
    /// belonging to a verified seller.
    pub fn base() -> Self {
        Self {
            clauses: vec![
                Clause::Equals {
                    field: Field::PartListed,
                    value: Scalar::Bool(true),
                },
                Clause::Equals {
                    field: Field::PartStatus,
                    value: Scalar::Text(status_name(PartStatus::Available).to_string()),
                },
                Clause::Equals {
                    field: Field::SellerVerified,
                    value: Scalar::Bool(true),
                },
            ],
        }
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

pub fn status_name(status: PartStatus) -> &'static str {
    match status {
        PartStatus::Available => "AVAILABLE",
        PartStatus::Reserved => "RESERVED",
        PartStatus::Sold => "SOLD",
    }
}
