/// Rank the pre-rounding score against the cohort's previously stored
/// ratings: round((strictly below / total) * 100).
///
/// An empty cohort has no rank at all. A single-member cohort defaults to
/// 50 regardless of relative position. An exact 0 is treated as
/// likely-missing data and surfaced as `None` rather than a genuine
/// bottom rank.
pub(crate) fn percentile_rank(score: f64, prior_ratings: &[u8]) -> Option<u8> {
    if prior_ratings.is_empty() {
        return None;
    }
    if prior_ratings.len() == 1 {
        return Some(50);
    }

    let below = prior_ratings
        .iter()
        .filter(|&&rating| f64::from(rating) < score)
        .count();
    let percentile = (below as f64 / prior_ratings.len() as f64 * 100.0).round() as u8;

    if percentile == 0 {
        None
    } else {
        Some(percentile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cohort_has_no_percentile() {
        assert_eq!(percentile_rank(7.5, &[]), None);
    }

    #[test]
    fn singleton_cohort_defaults_to_fifty() {
        assert_eq!(percentile_rank(9.9, &[2]), Some(50));
        assert_eq!(percentile_rank(1.0, &[9]), Some(50));
    }

    #[test]
    fn strictly_below_counting() {
        // 3 of 4 ratings sit strictly below 7.2.
        assert_eq!(percentile_rank(7.2, &[4, 6, 7, 9]), Some(75));
        // Equal ratings do not count as below.
        assert_eq!(percentile_rank(7.0, &[7, 7, 7, 9]), None);
    }

    #[test]
    fn exact_zero_is_surfaced_as_missing() {
        assert_eq!(percentile_rank(1.0, &[5, 6, 7, 8]), None);
    }

    #[test]
    fn top_of_cohort_reaches_one_hundred() {
        assert_eq!(percentile_rank(9.9, &[1, 2, 3, 4]), Some(100));
    }
}
