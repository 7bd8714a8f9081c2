use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use schoolatlas::directory::schools::domain::{Phase, SchoolId, SchoolRecord};
use schoolatlas::directory::schools::ratings::repository::{
    DirectoryError, RatingWrite, SchoolDirectory,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory backed by a process-local map. Stands in for the Postgres-backed
/// directory in demos and tests; rating writes land on the school row just
/// like the database update would.
#[derive(Default)]
pub(crate) struct InMemorySchoolDirectory {
    schools: Mutex<HashMap<SchoolId, SchoolRecord>>,
}

impl InMemorySchoolDirectory {
    pub(crate) fn seeded(rows: impl IntoIterator<Item = SchoolRecord>) -> Self {
        let directory = Self::default();
        directory.insert_all(rows);
        directory
    }

    pub(crate) fn insert_all(&self, rows: impl IntoIterator<Item = SchoolRecord>) {
        let mut guard = self.schools.lock().expect("directory mutex poisoned");
        for row in rows {
            guard.insert(row.id.clone(), row);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.schools.lock().expect("directory mutex poisoned").len()
    }
}

impl SchoolDirectory for InMemorySchoolDirectory {
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
        Ok(())
    }
}
