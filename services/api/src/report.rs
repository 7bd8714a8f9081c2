use chrono::Utc;
use schoolatlas::directory::import::SchoolCsvImporter;
use schoolatlas::directory::schools::domain::{SchoolId, SchoolRecord};
use schoolatlas::directory::schools::ratings::{
    inspection_score_or_midpoint, Rating, RatingEngine,
};
use schoolatlas::error::AppError;

use crate::cli::RateArgs;

pub(crate) fn run_rating_report(args: RateArgs) -> Result<(), AppError> {
    let RateArgs { schools, urn } = args;

    let roll = SchoolCsvImporter::from_path(schools)?;
    let target_id = SchoolId(urn);

    let target = match roll.iter().find(|school| school.id == target_id) {
        Some(target) => target,
        None => {
            println!("School {} not present in the roll file", target_id.0);
            return Ok(());
        }
    };

    let rating = RatingEngine::new().compute(target, &roll, Utc::now());
    render_rating_report(target, &rating);

    Ok(())
}

fn render_rating_report(school: &SchoolRecord, rating: &Rating) {
    println!("{} ({})", school.name, school.id.0);
    println!(
        "{} | {} | {}",
        school.country.label(),
        school.local_authority,
        school.phase.label()
    );

    match rating.value {
        Some(value) => println!("\nRating: {value}/10 ({})", rating.coverage.label()),
        None => println!("\nRating: {}", rating.coverage.label()),
    }
    println!("Data completeness: {}%", rating.data_completeness);

    if let Some(percentile) = rating.percentile {
        println!("Cohort percentile: {percentile}");
    } else {
        println!("Cohort percentile: not available");
    }

    println!(
        "Inspection headline: {:.1}",
        inspection_score_or_midpoint(school.effective_inspection_grade())
    );

    if rating.components.is_empty() {
        println!("\nComponents: none computable");
    } else {
        println!("\nComponents");
        for component in &rating.components {
            let detail = component
                .detail
                .as_deref()
                .map(|detail| format!(" ({detail})"))
                .unwrap_or_default();
            println!(
                "- {}: {:.1} at weight {}%{}",
                component.kind.label(),
                component.score,
                component.weight,
                detail
            );
        }
    }
}
