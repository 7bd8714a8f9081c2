use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::super::domain::{SchoolId, SchoolRecord};
use super::engine::RatingEngine;
use super::repository::{DirectoryError, RatingWrite, SchoolDirectory, SchoolRatingView};
use super::scorers::inspection_score_or_midpoint;
use super::staleness::{RefreshDecision, RefreshPolicy};
use super::Rating;

/// Per-request orchestration: fetch the school and its raw peer rows, compute
/// a fresh rating, and conditionally hand the write payload to storage. The
/// fresh rating is returned whether or not it was persisted.
pub struct SchoolRatingService<D> {
    directory: Arc<D>,
    engine: RatingEngine,
    refresh: RefreshPolicy,
}

impl<D> SchoolRatingService<D>
where
    D: SchoolDirectory + 'static,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self::with_refresh_policy(directory, RefreshPolicy::default())
    }

    pub fn with_refresh_policy(directory: Arc<D>, refresh: RefreshPolicy) -> Self {
        Self {
            directory,
            engine: RatingEngine::new(),
            refresh,
        }
    }

    pub fn rating(
        &self,
        id: &SchoolId,
        force: bool,
        now: DateTime<Utc>,
    ) -> Result<RatedSchool, RatingServiceError> {
        let school = self
            .directory
            .fetch(id)?
            .ok_or_else(|| RatingServiceError::UnknownSchool(id.clone()))?;

        let peer_rows = self
            .directory
            .peers(&school.local_authority, school.phase, id)?;

        let rating = self.engine.compute(&school, &peer_rows, now);

        let decision = self.refresh.decide(school.stored_rating.as_ref(), now, force);
        let persisted = match decision {
            RefreshDecision::Refresh(reason) => {
                let write = RatingWrite::from(&rating);
                self.directory.store_rating(id, &write)?;
                debug!(school = %id.0, reason = reason.label(), "stored refreshed rating");
                true
            }
            RefreshDecision::Keep => false,
        };

        Ok(RatedSchool {
            school,
            rating,
            persisted,
        })
    }

    /// Compute from caller-supplied rows without touching storage. Diagnostic
    /// invocations mutate nothing.
    pub fn preview(
        &self,
        school: &SchoolRecord,
        peer_rows: &[SchoolRecord],
        now: DateTime<Utc>,
    ) -> Rating {
        self.engine.compute(school, peer_rows, now)
    }
}

/// A school together with its freshly computed rating and whether the
/// staleness policy chose to persist it.
#[derive(Debug, Clone)]
pub struct RatedSchool {
    pub school: SchoolRecord,
    pub rating: Rating,
    pub persisted: bool,
}

impl RatedSchool {
    pub fn view(&self) -> SchoolRatingView {
        SchoolRatingView {
            school_id: self.school.id.clone(),
            name: self.school.name.clone(),
            rating: self.rating.value,
            coverage: self.rating.coverage.label(),
            data_completeness: self.rating.data_completeness,
            percentile: self.rating.percentile,
            components: self.rating.components.clone(),
            inspection_headline: inspection_score_or_midpoint(
                self.school.effective_inspection_grade(),
            ),
            computed_at: self.rating.computed_at,
            persisted: self.persisted,
        }
    }
}

/// Error raised by the rating service.
#[derive(Debug, thiserror::Error)]
pub enum RatingServiceError {
    #[error("school {0:?} not found")]
    UnknownSchool(SchoolId),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
