pub mod domain;
pub mod ratings;

pub use domain::{
    Country, InspectionGrades, Phase, SchoolId, SchoolRecord, Subject, SubjectScores,
};
pub use ratings::{
    ComponentKind, DataCoverage, Rating, RatingComponent, RatingEngine, StoredRating,
};
