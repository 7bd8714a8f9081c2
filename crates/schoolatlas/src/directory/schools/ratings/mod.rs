//! Composite school rating: country regime policies, component scorers,
//! weighted aggregation, percentile ranking, and the persistence refresh
//! policy.

mod aggregate;
mod cohort;
mod engine;
mod percentile;
pub mod policy;
pub mod repository;
pub mod router;
pub mod scorers;
pub mod service;
mod staleness;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use cohort::CohortAverages;
pub use engine::RatingEngine;
pub use policy::CountryPolicy;
pub use repository::{DirectoryError, RatingWrite, SchoolDirectory, SchoolRatingView};
pub use router::rating_router;
pub use scorers::inspection_score_or_midpoint;
pub use service::{RatedSchool, RatingServiceError, SchoolRatingService};
pub use staleness::{RefreshDecision, RefreshPolicy, RefreshReason};

/// The kinds of sub-score a rating can be assembled from. At most one of each
/// appears per computation; `reviews` only applies to French schools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Ofsted,
    Academic,
    Attendance,
    Reviews,
}

impl ComponentKind {
    pub const fn label(self) -> &'static str {
        match self {
            ComponentKind::Ofsted => "ofsted",
            ComponentKind::Academic => "academic",
            ComponentKind::Attendance => "attendance",
            ComponentKind::Reviews => "reviews",
        }
    }
}

/// Discrete contribution to a rating, kept so callers can audit the blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingComponent {
    pub kind: ComponentKind,
    /// Sub-score on the shared 1.0-10.0 scale.
    pub score: f64,
    /// Regime weight, integer percent.
    pub weight: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// How much of the regime's evidence was available for a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCoverage {
    Insufficient,
    Partial,
    Complete,
}

impl DataCoverage {
    /// Advisory label only; never feeds back into the numbers.
    pub const fn label(self) -> &'static str {
        match self {
            DataCoverage::Insufficient => "insufficient data",
            DataCoverage::Partial => "partial data",
            DataCoverage::Complete => "complete data",
        }
    }
}

/// A freshly computed composite rating.
///
/// `value` is `None` exactly when `data_completeness` fell below the regime
/// threshold; that is an expected outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub value: Option<u8>,
    pub components: Vec<RatingComponent>,
    /// Sum of the weights of the components actually computed, out of 100.
    pub data_completeness: u8,
    pub coverage: DataCoverage,
    pub percentile: Option<u8>,
    pub computed_at: DateTime<Utc>,
}

/// The persisted cache of the last computation, carried on the school row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRating {
    pub value: Option<u8>,
    pub components: Vec<RatingComponent>,
    pub percentile: Option<u8>,
    pub computed_at: DateTime<Utc>,
}
