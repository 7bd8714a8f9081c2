use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::super::domain::{SchoolId, SchoolRecord};
use super::repository::SchoolDirectory;
use super::service::{RatingServiceError, SchoolRatingService};

/// Router builder exposing the rating endpoints.
pub fn rating_router<D>(service: Arc<SchoolRatingService<D>>) -> Router
where
    D: SchoolDirectory + 'static,
{
    Router::new()
        .route("/api/v1/schools/:urn/rating", get(rating_handler::<D>))
        .route("/api/v1/ratings/preview", post(preview_handler::<D>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RatingQuery {
    #[serde(default)]
    force: bool,
}

pub(crate) async fn rating_handler<D>(
    State(service): State<Arc<SchoolRatingService<D>>>,
    Path(urn): Path<String>,
    Query(query): Query<RatingQuery>,
) -> Response
where
    D: SchoolDirectory + 'static,
{
    let id = SchoolId(urn);
    match service.rating(&id, query.force, Utc::now()) {
        Ok(rated) => (StatusCode::OK, axum::Json(rated.view())).into_response(),
        Err(RatingServiceError::UnknownSchool(id)) => {
            let payload = json!({
                "error": format!("school {} not found", id.0),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// Body for diagnostic previews: a school row plus candidate peers, computed
/// without any storage interaction.
#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    pub(crate) school: SchoolRecord,
    #[serde(default)]
    pub(crate) peers: Vec<SchoolRecord>,
    #[serde(default)]
    pub(crate) as_of: Option<DateTime<Utc>>,
}

pub(crate) async fn preview_handler<D>(
    State(service): State<Arc<SchoolRatingService<D>>>,
    axum::Json(request): axum::Json<PreviewRequest>,
) -> Response
where
    D: SchoolDirectory + 'static,
{
    let as_of = request.as_of.unwrap_or_else(Utc::now);
    let rating = service.preview(&request.school, &request.peers, as_of);
    (StatusCode::OK, axum::Json(rating)).into_response()
}
