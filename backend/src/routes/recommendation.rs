//! Workout recommendation and progress polling routes

use crate::services::recommendation::{ProgressSink, RecommendationError, RunLog, StdRandom};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    routing::get,
    Json, Router,
};
use fitcoach_shared::{RecommendationQuery, RecommendationResponse};
use validator::Validate;

pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route("/", get(recommend))
}

pub fn polling_routes() -> Router<AppState> {
    Router::new().route("/logs", get(poll_logs))
}

/// GET /api/v1/recommendation?daysPerWeek=&workoutEnvironmentId=
///
/// Progress lines are mirrored into the process-wide log so a client can
/// poll them while the run is in flight.
async fn recommend(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<RecommendationResponse>, RecommendationError> {
    let Query(query) = query.map_err(|e| RecommendationError::InvalidRequest(e.body_text()))?;
    query
        .validate()
        .map_err(|e| RecommendationError::InvalidRequest(e.to_string()))?;

    let authorization = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());
    let log = RunLog::mirrored(state.progress_log.clone());
    let mut rng = StdRandom::from_entropy();

    let outcome = state
        .engine
        .recommend(authorization, &query, &log, &mut rng)
        .await?;

    Ok(Json(RecommendationResponse {
        daily_routines: outcome.daily_routines,
    }))
}

/// GET /api/v1/polling/logs - progress lines written since the last poll
async fn poll_logs(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.progress_log.drain_and_clear())
}
