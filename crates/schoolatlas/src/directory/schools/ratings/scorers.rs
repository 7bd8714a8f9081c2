use super::super::domain::{Subject, SubjectScores};
use super::cohort::CohortAverages;

/// Ordinal inspection grade to sub-score. Grades outside 1-4 score nothing;
/// the canonical aggregation path drops the component instead of guessing.
pub(crate) fn inspection_score(grade: u8) -> Option<f64> {
    match grade {
        1 => Some(9.5),
        2 => Some(7.5),
        3 => Some(4.5),
        4 => Some(2.5),
        _ => None,
    }
}

/// Legacy display helper: missing or unrecognized grades fall back to the
/// scale midpoint. Profile views still call this; the rating aggregation
/// never does.
pub fn inspection_score_or_midpoint(grade: Option<u8>) -> f64 {
    grade.and_then(inspection_score).unwrap_or(5.0)
}

/// Academic component over the regime's subject set. Every 4 percentage
/// points above or below the cohort average shifts a subject one point from
/// the neutral 5, clamped to [1, 10]; the component score is the mean of the
/// computable subjects. No computable subject means no component.
pub(crate) fn academic_score(
    scores: &SubjectScores,
    cohort: &CohortAverages,
    subjects: &[Subject],
) -> Option<AcademicScore> {
    let mut counted = Vec::new();
    let mut total = 0.0;

    for &subject in subjects {
        let (school, average) = match (scores.score_for(subject), cohort.subject_average(subject)) {
            (Some(school), Some(average)) => (school, average),
            _ => continue,
        };
        total += subject_subscore(school, average);
        counted.push(subject);
    }

    if counted.is_empty() {
        return None;
    }

    Some(AcademicScore {
        score: total / counted.len() as f64,
        counted,
    })
}

/// Academic sub-score plus which subjects could be compared, for audit detail.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AcademicScore {
    pub(crate) score: f64,
    pub(crate) counted: Vec<Subject>,
}

impl AcademicScore {
    pub(crate) fn detail(&self) -> String {
        let labels: Vec<&str> = self.counted.iter().map(|subject| subject.label()).collect();
        format!("vs cohort average across {}", labels.join(", "))
    }
}

fn subject_subscore(school: f64, cohort_average: f64) -> f64 {
    (5.0 + (school - cohort_average) / 4.0).clamp(1.0, 10.0)
}

/// Linear attendance map anchored at 80% -> 1 and 100% -> 10, clamped at the
/// ends, one decimal place.
pub(crate) fn attendance_score(rate: f64) -> f64 {
    round_one_decimal((1.0 + (rate - 80.0) * 9.0 / 20.0).clamp(1.0, 10.0))
}

/// Review average (0-5 scale) to sub-score, one decimal place. France only.
pub(crate) fn review_score(average: f64) -> f64 {
    round_one_decimal((average * 2.0).clamp(1.0, 10.0))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
