use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::directory::schools::domain::{
    Country, InspectionGrades, Phase, SchoolId, SchoolRecord, SubjectScores,
};
use crate::directory::schools::ratings::repository::{
    DirectoryError, RatingWrite, SchoolDirectory,
};
use crate::directory::schools::ratings::service::SchoolRatingService;
use crate::directory::schools::ratings::{ComponentKind, RatingComponent, StoredRating};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// School with no metrics at all; tests fill in what they need.
pub(super) fn bare_school(urn: &str, country: Country) -> SchoolRecord {
    SchoolRecord {
        id: SchoolId(urn.to_string()),
        name: format!("School {urn}"),
        country,
        local_authority: "Leeds".to_string(),
        phase: Phase::Primary,
        inspection: InspectionGrades::default(),
        subject_scores: SubjectScores::default(),
        attendance_rate: None,
        review_average: None,
        review_count: 0,
        stored_rating: None,
    }
}

/// The worked England example: English 72 vs a cohort averaging 60, grade 2,
/// attendance 95, no math or science.
pub(super) fn england_school(urn: &str) -> SchoolRecord {
    let mut school = bare_school(urn, Country::England);
    school.inspection.overall_effectiveness = Some(2);
    school.subject_scores.english = Some(72.0);
    school.attendance_rate = Some(95.0);
    school
}

pub(super) fn peer(urn: &str, english: f64, rating: Option<u8>) -> SchoolRecord {
    let mut school = bare_school(urn, Country::England);
    school.subject_scores.english = Some(english);
    school.stored_rating = rating.map(|value| stored_rating(value, 5));
    school
}

/// Four peers whose English scores average 60 and whose stored ratings are
/// 6, 7, 8, 9.
pub(super) fn english_cohort() -> Vec<SchoolRecord> {
    vec![
        peer("200001", 55.0, Some(6)),
        peer("200002", 58.0, Some(7)),
        peer("200003", 62.0, Some(8)),
        peer("200004", 65.0, Some(9)),
    ]
}

pub(super) fn stored_rating(value: u8, age_days: i64) -> StoredRating {
    StoredRating {
        value: Some(value),
        components: vec![RatingComponent {
            kind: ComponentKind::Attendance,
            score: f64::from(value),
            weight: 20,
            detail: None,
        }],
        percentile: Some(50),
        computed_at: now() - Duration::days(age_days),
    }
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    schools: Mutex<HashMap<SchoolId, SchoolRecord>>,
    writes: Mutex<Vec<(SchoolId, RatingWrite)>>,
}

impl MemoryDirectory {
    pub(super) fn with_schools(rows: impl IntoIterator<Item = SchoolRecord>) -> Self {
        let directory = Self::default();
        {
            let mut guard = directory.schools.lock().expect("directory mutex poisoned");
            for row in rows {
                guard.insert(row.id.clone(), row);
            }
        }
        directory
    }

    pub(super) fn writes(&self) -> Vec<(SchoolId, RatingWrite)> {
        self.writes.lock().expect("write log mutex poisoned").clone()
    }

    pub(super) fn stored_for(&self, id: &SchoolId) -> Option<StoredRating> {
        let guard = self.schools.lock().expect("directory mutex poisoned");
        guard.get(id).and_then(|school| school.stored_rating.clone())
    }
}

impl SchoolDirectory for MemoryDirectory {
    fn fetch(&self, id: &SchoolId) -> Result<Option<SchoolRecord>, DirectoryError> {
        let guard = self.schools.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn peers(
        &self,
        local_authority: &str,
        phase: Phase,
        exclude: &SchoolId,
    ) -> Result<Vec<SchoolRecord>, DirectoryError> {
        let guard = self.schools.lock().expect("directory mutex poisoned");
        Ok(guard
            .values()
            .filter(|school| {
                school.id != *exclude
                    && school.phase == phase
                    && school.local_authority.eq_ignore_ascii_case(local_authority)
            })
            .cloned()
            .collect())
    }

    fn store_rating(&self, id: &SchoolId, write: &RatingWrite) -> Result<(), DirectoryError> {
        let mut guard = self.schools.lock().expect("directory mutex poisoned");
        let school = guard.get_mut(id).ok_or(DirectoryError::NotFound)?;
        school.stored_rating = Some(write.clone().into_stored());
        self.writes
            .lock()
            .expect("write log mutex poisoned")
            .push((id.clone(), write.clone()));
        Ok(())
    }
}

pub(super) struct UnavailableDirectory;

impl SchoolDirectory for UnavailableDirectory {
    fn fetch(&self, _id: &SchoolId) -> Result<Option<SchoolRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }

    fn peers(
        &self,
        _local_authority: &str,
        _phase: Phase,
        _exclude: &SchoolId,
    ) -> Result<Vec<SchoolRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }

    fn store_rating(&self, _id: &SchoolId, _write: &RatingWrite) -> Result<(), DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service(
    rows: impl IntoIterator<Item = SchoolRecord>,
) -> (SchoolRatingService<MemoryDirectory>, Arc<MemoryDirectory>) {
    let directory = Arc::new(MemoryDirectory::with_schools(rows));
    let service = SchoolRatingService::new(directory.clone());
    (service, directory)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
