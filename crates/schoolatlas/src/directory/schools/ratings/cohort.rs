use super::super::domain::{SchoolRecord, Subject};

/// Comparison baseline for one target school: per-metric means across peers
/// sharing local authority and phase, plus the cohort's previously stored
/// rating values for percentile ranking.
///
/// Means are taken over non-null values only; a metric nobody in the cohort
/// reports stays `None`, which downstream scorers read as "comparison
/// unavailable" rather than a neutral midpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortAverages {
    pub english: Option<f64>,
    pub math: Option<f64>,
    pub science: Option<f64>,
    pub attendance: Option<f64>,
    pub prior_ratings: Vec<u8>,
    pub peer_count: usize,
}

impl CohortAverages {
    /// Derive averages from raw directory rows. Rows outside the target's
    /// local authority or phase are ignored, as is the target itself.
    pub fn resolve(target: &SchoolRecord, rows: &[SchoolRecord]) -> Self {
        let peers: Vec<&SchoolRecord> = rows
            .iter()
            .filter(|row| {
                row.id != target.id
                    && row.phase == target.phase
                    && row
                        .local_authority
                        .eq_ignore_ascii_case(&target.local_authority)
            })
            .collect();

        let prior_ratings = peers
            .iter()
            .filter_map(|peer| peer.stored_rating.as_ref())
            .filter_map(|stored| stored.value)
            .collect();

        Self {
            english: mean(peers.iter().filter_map(|peer| peer.subject_scores.english)),
            math: mean(peers.iter().filter_map(|peer| peer.subject_scores.math)),
            science: mean(peers.iter().filter_map(|peer| peer.subject_scores.science)),
            attendance: mean(peers.iter().filter_map(|peer| peer.attendance_rate)),
            prior_ratings,
            peer_count: peers.len(),
        }
    }

    pub fn subject_average(&self, subject: Subject) -> Option<f64> {
        match subject {
            Subject::English => self.english,
            Subject::Math => self.math,
            Subject::Science => self.science,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
