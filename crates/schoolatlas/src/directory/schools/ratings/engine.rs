use chrono::{DateTime, Utc};

use super::super::domain::SchoolRecord;
use super::aggregate::aggregate;
use super::cohort::CohortAverages;
use super::percentile::percentile_rank;
use super::policy::CountryPolicy;
use super::scorers;
use super::{ComponentKind, Rating, RatingComponent};

/// Stateless calculator turning one school row plus its raw peer rows into a
/// composite rating. Identical inputs always produce identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingEngine;

impl RatingEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(
        &self,
        school: &SchoolRecord,
        peer_rows: &[SchoolRecord],
        computed_at: DateTime<Utc>,
    ) -> Rating {
        let policy = CountryPolicy::for_country(school.country);
        let cohort = CohortAverages::resolve(school, peer_rows);

        let components: Vec<RatingComponent> = policy
            .components
            .iter()
            .filter_map(|&(kind, weight)| score_component(kind, weight, school, &cohort, policy))
            .collect();

        let aggregation = aggregate(components, policy.minimum_completeness);
        let percentile = aggregation
            .normalized
            .and_then(|score| percentile_rank(score, &cohort.prior_ratings));

        Rating {
            value: aggregation.value,
            components: aggregation.components,
            data_completeness: aggregation.data_completeness,
            coverage: aggregation.coverage,
            percentile,
            computed_at,
        }
    }
}

fn score_component(
    kind: ComponentKind,
    weight: u8,
    school: &SchoolRecord,
    cohort: &CohortAverages,
    policy: &CountryPolicy,
) -> Option<RatingComponent> {
    match kind {
        ComponentKind::Ofsted => {
            let grade = school.effective_inspection_grade()?;
            let score = scorers::inspection_score(grade)?;
            Some(RatingComponent {
                kind,
                score,
                weight,
                detail: Some(format!("inspection grade {grade}")),
            })
        }
        ComponentKind::Academic => {
            let academic =
                scorers::academic_score(&school.subject_scores, cohort, policy.academic_subjects)?;
            Some(RatingComponent {
                kind,
                score: academic.score,
                weight,
                detail: Some(academic.detail()),
            })
        }
        ComponentKind::Attendance => {
            let rate = school.attendance_rate?;
            Some(RatingComponent {
                kind,
                score: scorers::attendance_score(rate),
                weight,
                detail: Some(format!("attendance rate {rate:.1}%")),
            })
        }
        ComponentKind::Reviews => {
            if school.review_count == 0 {
                return None;
            }
            let average = school.review_average?;
            Some(RatingComponent {
                kind,
                score: scorers::review_score(average),
                weight,
                detail: Some(format!(
                    "average of {} review(s) on a 0-5 scale",
                    school.review_count
                )),
            })
        }
    }
}
