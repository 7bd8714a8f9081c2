use serde::{Deserialize, Serialize};

use super::ratings::StoredRating;

/// Identifier wrapper for schools: URN in the UK, UAI in France.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchoolId(pub String);

/// Jurisdiction a school is inspected and scored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    England,
    NorthernIreland,
    Wales,
    Scotland,
    France,
}

impl Country {
    /// Parse a free-text country label. Unrecognized or empty input folds to
    /// England so the scoring regime lookup stays total.
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "northern ireland" | "northern-ireland" | "ni" => Self::NorthernIreland,
            "wales" | "cymru" => Self::Wales,
            "scotland" => Self::Scotland,
            "france" | "fr" => Self::France,
            _ => Self::England,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Country::England => "England",
            Country::NorthernIreland => "Northern Ireland",
            Country::Wales => "Wales",
            Country::Scotland => "Scotland",
            Country::France => "France",
        }
    }
}

/// Education phase; cohort membership requires an exact phase match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Nursery,
    Primary,
    Secondary,
    AllThrough,
    Special,
    PostSixteen,
}

impl Phase {
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "nursery" => Some(Self::Nursery),
            "primary" | "primary school" => Some(Self::Primary),
            "secondary" | "secondary school" => Some(Self::Secondary),
            "all-through" | "all through" | "all_through" => Some(Self::AllThrough),
            "special" | "special school" => Some(Self::Special),
            "16 plus" | "post-16" | "post_sixteen" | "sixth form" => Some(Self::PostSixteen),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Phase::Nursery => "nursery",
            Phase::Primary => "primary",
            Phase::Secondary => "secondary",
            Phase::AllThrough => "all-through",
            Phase::Special => "special",
            Phase::PostSixteen => "16 plus",
        }
    }
}

/// Subjects the academic component may draw on. The regime decides which apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    English,
    Math,
    Science,
}

impl Subject {
    pub const fn label(self) -> &'static str {
        match self {
            Subject::English => "english",
            Subject::Math => "math",
            Subject::Science => "science",
        }
    }
}

/// Ordinal Ofsted grades (1 Outstanding .. 4 Inadequate) as published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionGrades {
    pub overall_effectiveness: Option<u8>,
    pub quality_of_education: Option<u8>,
}

/// Standardized subject attainment, percentages 0-100 as published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectScores {
    pub english: Option<f64>,
    pub math: Option<f64>,
    pub science: Option<f64>,
}

impl SubjectScores {
    pub fn score_for(&self, subject: Subject) -> Option<f64> {
        match subject {
            Subject::English => self.english,
            Subject::Math => self.math,
            Subject::Science => self.science,
        }
    }
}

/// One school row as the import pipeline delivers it. Read-only input to the
/// rating engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub id: SchoolId,
    pub name: String,
    pub country: Country,
    pub local_authority: String,
    pub phase: Phase,
    #[serde(default)]
    pub inspection: InspectionGrades,
    #[serde(default)]
    pub subject_scores: SubjectScores,
    #[serde(default)]
    pub attendance_rate: Option<f64>,
    #[serde(default)]
    pub review_average: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub stored_rating: Option<StoredRating>,
}

impl SchoolRecord {
    /// The inspection grade the rating should score. `overall_effectiveness`
    /// wins; `quality_of_education` stands in when it is absent, except for
    /// Wales where the proxy grade is not admissible.
    pub fn effective_inspection_grade(&self) -> Option<u8> {
        match self.country {
            Country::Wales => self.inspection.overall_effectiveness,
            _ => self
                .inspection
                .overall_effectiveness
                .or(self.inspection.quality_of_education),
        }
    }
}
