//! API request and response types

use crate::classification::{BodyFatChart, BodyFatTier, LeanMassTier};
use crate::models::DailyRoutine;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Query string of the recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    #[validate(range(min = 1, max = 7, message = "daysPerWeek must be between 1 and 7"))]
    pub days_per_week: u32,
    #[validate(range(min = 1, message = "workoutEnvironmentId must be positive"))]
    pub workout_environment_id: i32,
}

/// Successful recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub daily_routines: Vec<DailyRoutine>,
}

/// Failed recommendation: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationFailure {
    pub error: String,
}

/// Body composition summary for one measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessResultResponse {
    pub measurement_id: i32,
    pub age: i32,
    pub body_fat_percent: f64,
    pub lean_muscle_mass: f64,
    pub lean_mass_index: f64,
    pub body_fat_classification: BodyFatTier,
    pub lean_mass_classification: LeanMassTier,
    pub body_fat_chart: BodyFatChart,
}
