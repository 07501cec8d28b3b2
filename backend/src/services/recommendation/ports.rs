//! Collaborators the recommendation engine depends on
//!
//! The engine only sees these traits; PostgreSQL implementations live in
//! `crate::repositories` and tests supply in-memory fakes.

use async_trait::async_trait;
use fitcoach_shared::{
    AuthError, BodyMeasurementSnapshot, Exercise, ExerciseCriteria, Profile, ProgressRecord, Video,
};
use uuid::Uuid;

/// Turns the caller's `Authorization` header into a user id
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, authorization: Option<&str>) -> Result<Uuid, AuthError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get_by_user_id(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;
}

#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Latest progress records for a profile, most recent first
    async fn get_recent_progress(&self, profile_id: i32, limit: usize) -> anyhow::Result<Vec<ProgressRecord>>;

    async fn get_measurement(&self, measurement_id: i32) -> anyhow::Result<Option<BodyMeasurementSnapshot>>;
}

#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Every exercise matching the criteria exactly
    async fn find(&self, criteria: &ExerciseCriteria) -> anyhow::Result<Vec<Exercise>>;
}

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// All demonstration videos of an exercise; the caller picks one
    async fn find_by_exercise(&self, exercise_id: i32) -> anyhow::Result<Vec<Video>>;
}
