//! Fitness result routes

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use fitcoach_shared::FitnessResultResponse;

pub fn fitness_routes() -> Router<AppState> {
    Router::new().route("/result/:measurement_id", get(fitness_result))
}

/// GET /api/v1/fitness/result/:measurementId
async fn fitness_result(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(measurement_id): Path<i32>,
) -> ApiResult<Json<FitnessResultResponse>> {
    if measurement_id < 1 {
        return Err(ApiError::Validation("measurementId must be positive".to_string()));
    }
    let result = state.fitness.result(auth.user_id, measurement_id).await?;
    Ok(Json(result))
}
