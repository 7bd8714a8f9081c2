use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{Phase, SchoolId, SchoolRecord};
use super::{Rating, RatingComponent, StoredRating};

/// Storage abstraction supplying school rows and accepting rating writes, so
/// the service module can be exercised without a database.
pub trait SchoolDirectory: Send + Sync {
    fn fetch(&self, id: &SchoolId) -> Result<Option<SchoolRecord>, DirectoryError>;

    /// Raw candidate peer rows for a cohort. Callers may over-fetch; the
    /// cohort resolver re-filters by local authority, phase, and id.
    fn peers(
        &self,
        local_authority: &str,
        phase: Phase,
        exclude: &SchoolId,
    ) -> Result<Vec<SchoolRecord>, DirectoryError>;

    fn store_rating(&self, id: &SchoolId, write: &RatingWrite) -> Result<(), DirectoryError>;
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("school not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// The persistence payload the engine hands to the storage collaborator.
/// Last-write-wins on the school row; the engine performs no I/O itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingWrite {
    pub value: Option<u8>,
    pub components: Vec<RatingComponent>,
    pub percentile: Option<u8>,
    pub computed_at: DateTime<Utc>,
}

impl From<&Rating> for RatingWrite {
    fn from(rating: &Rating) -> Self {
        Self {
            value: rating.value,
            components: rating.components.clone(),
            percentile: rating.percentile,
            computed_at: rating.computed_at,
        }
    }
}

impl RatingWrite {
    pub fn into_stored(self) -> StoredRating {
        StoredRating {
            value: self.value,
            components: self.components,
            percentile: self.percentile,
            computed_at: self.computed_at,
        }
    }
}

/// Sanitized rating payload exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct SchoolRatingView {
    pub school_id: SchoolId,
    pub name: String,
    pub rating: Option<u8>,
    pub coverage: &'static str,
    pub data_completeness: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<u8>,
    pub components: Vec<RatingComponent>,
    /// Headline inspection figure for profile display; uses the legacy
    /// midpoint fallback, unlike the rating itself.
    pub inspection_headline: f64,
    pub computed_at: DateTime<Utc>,
    pub persisted: bool,
}
