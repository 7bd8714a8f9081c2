use super::super::domain::{Country, Subject};
use super::ComponentKind;

/// Scoring regime for one country grouping: which components apply, their
/// integer-percent weights, the academic subject set, and the minimum data
/// completeness required before a numeric rating is emitted.
///
/// Expressed as data so a single aggregation path serves every regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryPolicy {
    pub name: &'static str,
    pub components: &'static [(ComponentKind, u8)],
    pub academic_subjects: &'static [Subject],
    pub minimum_completeness: u8,
}

const ENGLAND_NI: CountryPolicy = CountryPolicy {
    name: "england-ni",
    components: &[
        (ComponentKind::Ofsted, 40),
        (ComponentKind::Academic, 40),
        (ComponentKind::Attendance, 20),
    ],
    academic_subjects: &[Subject::English, Subject::Math, Subject::Science],
    minimum_completeness: 40,
};

const WALES: CountryPolicy = CountryPolicy {
    name: "wales",
    components: &[
        (ComponentKind::Academic, 80),
        (ComponentKind::Attendance, 20),
    ],
    academic_subjects: &[Subject::English, Subject::Math, Subject::Science],
    minimum_completeness: 20,
};

const SCOTLAND: CountryPolicy = CountryPolicy {
    name: "scotland",
    components: &[
        (ComponentKind::Academic, 60),
        (ComponentKind::Attendance, 40),
    ],
    academic_subjects: &[Subject::English, Subject::Math],
    minimum_completeness: 50,
};

// France is scored from review averages rather than the national datasets.
// A single full-weight component keeps it on the shared aggregation path.
const FRANCE: CountryPolicy = CountryPolicy {
    name: "france",
    components: &[(ComponentKind::Reviews, 100)],
    academic_subjects: &[],
    minimum_completeness: 1,
};

impl CountryPolicy {
    /// Pure lookup; `Country` parsing already folded unrecognized labels to
    /// England, so every country resolves.
    pub fn for_country(country: Country) -> &'static CountryPolicy {
        match country {
            Country::England | Country::NorthernIreland => &ENGLAND_NI,
            Country::Wales => &WALES,
            Country::Scotland => &SCOTLAND,
            Country::France => &FRANCE,
        }
    }

    pub fn weight_for(&self, kind: ComponentKind) -> Option<u8> {
        self.components
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, weight)| *weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regimes_weigh_out_to_one_hundred() {
        for policy in [&ENGLAND_NI, &WALES, &SCOTLAND, &FRANCE] {
            let total: u16 = policy
                .components
                .iter()
                .map(|(_, weight)| u16::from(*weight))
                .sum();
            assert_eq!(total, 100, "{} weights must sum to 100", policy.name);
        }
    }

    #[test]
    fn wales_and_scotland_have_no_ofsted_component() {
        assert!(WALES.weight_for(ComponentKind::Ofsted).is_none());
        assert!(SCOTLAND.weight_for(ComponentKind::Ofsted).is_none());
        assert_eq!(ENGLAND_NI.weight_for(ComponentKind::Ofsted), Some(40));
    }

    #[test]
    fn scotland_scores_english_and_math_only() {
        assert_eq!(
            SCOTLAND.academic_subjects,
            &[Subject::English, Subject::Math][..]
        );
        assert!(ENGLAND_NI.academic_subjects.contains(&Subject::Science));
    }

    #[test]
    fn northern_ireland_shares_the_england_regime() {
        assert_eq!(
            CountryPolicy::for_country(Country::NorthernIreland),
            CountryPolicy::for_country(Country::England)
        );
    }
}
