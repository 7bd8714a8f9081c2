use super::{DataCoverage, RatingComponent};

/// Result of blending the available components under one regime.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Aggregation {
    pub(crate) components: Vec<RatingComponent>,
    pub(crate) data_completeness: u8,
    /// Weighted mean before rounding; feeds the percentile ranker.
    pub(crate) normalized: Option<f64>,
    pub(crate) value: Option<u8>,
    pub(crate) coverage: DataCoverage,
}

/// Combine scored components: sum applied weights, gate on the regime
/// threshold, renormalize weights to the components actually present, and
/// round half-up to the final integer value.
///
/// Below-threshold completeness is a terminal outcome, not an error.
pub(crate) fn aggregate(components: Vec<RatingComponent>, minimum_completeness: u8) -> Aggregation {
    let data_completeness: u8 = components
        .iter()
        .map(|component| component.weight)
        .fold(0u8, u8::saturating_add);

    if data_completeness < minimum_completeness {
        return Aggregation {
            components,
            data_completeness,
            normalized: None,
            value: None,
            coverage: DataCoverage::Insufficient,
        };
    }

    let weighted: f64 = components
        .iter()
        .map(|component| component.score * f64::from(component.weight))
        .sum();
    let normalized = weighted / f64::from(data_completeness);

    let coverage = if data_completeness == 100 {
        DataCoverage::Complete
    } else {
        DataCoverage::Partial
    };

    Aggregation {
        components,
        data_completeness,
        normalized: Some(normalized),
        value: Some(normalized.round() as u8),
        coverage,
    }
}
