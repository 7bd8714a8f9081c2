mod parser;

use std::io::Read;
use std::path::Path;

use crate::directory::schools::domain::SchoolRecord;

/// Errors raised while loading a school-roll export.
#[derive(Debug, thiserror::Error)]
pub enum SchoolImportError {
    #[error("failed to read school roll: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid school roll CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("rejected school row {urn}: {message}")]
    Row { urn: String, message: String },
}

/// Loads `SchoolRecord`s from the master CSV the data pipeline produces.
pub struct SchoolCsvImporter;

impl SchoolCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SchoolRecord>, SchoolImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SchoolRecord>, SchoolImportError> {
        parser::parse_rows(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::schools::domain::{Country, Phase};
    use std::io::Cursor;

    const HEADER: &str = "urn,name,country,local_authority,phase,\
ofsted_overall_effectiveness,ofsted_quality_of_education,english_score,\
math_score,science_score,attendance_rate,review_average,review_count\n";

    #[test]
    fn parses_a_fully_populated_row() {
        let csv = format!(
            "{HEADER}100001,Riverdale Primary,England,Leeds,primary,2,1,68.5,70.2,64.0,94.6,,\n"
        );
        let records = SchoolCsvImporter::from_reader(Cursor::new(csv)).expect("roll parses");

        assert_eq!(records.len(), 1);
        let school = &records[0];
        assert_eq!(school.id.0, "100001");
        assert_eq!(school.country, Country::England);
        assert_eq!(school.phase, Phase::Primary);
        assert_eq!(school.inspection.overall_effectiveness, Some(2));
        assert_eq!(school.subject_scores.math, Some(70.2));
        assert_eq!(school.attendance_rate, Some(94.6));
        assert_eq!(school.review_count, 0);
    }

    #[test]
    fn blank_cells_become_missing_metrics() {
        let csv = format!("{HEADER}100002,Hollow Lane,England,Leeds,primary,,,,,,,,\n");
        let records = SchoolCsvImporter::from_reader(Cursor::new(csv)).expect("roll parses");

        let school = &records[0];
        assert_eq!(school.inspection.overall_effectiveness, None);
        assert_eq!(school.subject_scores.english, None);
        assert_eq!(school.attendance_rate, None);
        assert_eq!(school.review_average, None);
    }

    #[test]
    fn unknown_country_label_folds_to_england() {
        let csv = format!("{HEADER}100003,Border House,Atlantis,Leeds,secondary,,,,,,,,\n");
        let records = SchoolCsvImporter::from_reader(Cursor::new(csv)).expect("roll parses");
        assert_eq!(records[0].country, Country::England);
    }

    #[test]
    fn french_row_carries_review_aggregate() {
        let csv =
            format!("{HEADER}0750001A,Lycee Voltaire,France,Paris,secondary,,,,,,,4.2,17\n");
        let records = SchoolCsvImporter::from_reader(Cursor::new(csv)).expect("roll parses");

        let school = &records[0];
        assert_eq!(school.country, Country::France);
        assert_eq!(school.review_average, Some(4.2));
        assert_eq!(school.review_count, 17);
    }

    #[test]
    fn unrecognized_phase_is_rejected_with_the_urn() {
        let csv = format!("{HEADER}100004,Odd One Out,England,Leeds,hedge school,,,,,,,,\n");
        let error = SchoolCsvImporter::from_reader(Cursor::new(csv)).expect_err("row rejected");

        match error {
            SchoolImportError::Row { urn, message } => {
                assert_eq!(urn, "100004");
                assert!(message.contains("hedge school"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error =
            SchoolCsvImporter::from_path("./does-not-exist.csv").expect_err("expected io error");
        match error {
            SchoolImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
