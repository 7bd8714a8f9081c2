use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::SchoolImportError;
use crate::directory::schools::domain::{
    Country, InspectionGrades, Phase, SchoolId, SchoolRecord, SubjectScores,
};

/// One row of the master school-roll export. Blank cells deserialize to
/// `None`; malformed numeric cells are CSV errors.
#[derive(Debug, Deserialize)]
struct SchoolRow {
    urn: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    local_authority: String,
    phase: String,
    #[serde(default)]
    ofsted_overall_effectiveness: Option<u8>,
    #[serde(default)]
    ofsted_quality_of_education: Option<u8>,
    #[serde(default)]
    english_score: Option<f64>,
    #[serde(default)]
    math_score: Option<f64>,
    #[serde(default)]
    science_score: Option<f64>,
    #[serde(default)]
    attendance_rate: Option<f64>,
    #[serde(default)]
    review_average: Option<f64>,
    #[serde(default)]
    review_count: Option<u32>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<SchoolRecord>, SchoolImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<SchoolRow>() {
        records.push(to_record(row?)?);
    }

    Ok(records)
}

fn to_record(row: SchoolRow) -> Result<SchoolRecord, SchoolImportError> {
    let phase = Phase::from_label(&row.phase).ok_or_else(|| SchoolImportError::Row {
        urn: row.urn.clone(),
        message: format!("unrecognized phase '{}'", row.phase),
    })?;

    let country = row
        .country
        .as_deref()
        .map(Country::from_label)
        .unwrap_or(Country::England);

    Ok(SchoolRecord {
        id: SchoolId(row.urn),
        name: row.name,
        country,
        local_authority: row.local_authority,
        phase,
        inspection: InspectionGrades {
            overall_effectiveness: row.ofsted_overall_effectiveness,
            quality_of_education: row.ofsted_quality_of_education,
        },
        subject_scores: SubjectScores {
            english: row.english_score,
            math: row.math_score,
            science: row.science_score,
        },
        attendance_rate: row.attendance_rate,
        review_average: row.review_average,
        review_count: row.review_count.unwrap_or(0),
        stored_rating: None,
    })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
