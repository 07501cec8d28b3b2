//! Workout recommendation service
//!
//! Builds a week of daily routines from the user's profile, recent body
//! measurements and the base plan catalog.

mod engine;
mod ports;
mod progress;
mod random;
mod resolver;
mod selection;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{
    max_exercises_for_intensity, RecommendationEngine, RecommendationOutcome, MEASUREMENT_MISSING,
    NO_SUITABLE_PLAN, PROFILE_MISSING,
};
pub use ports::{
    ExerciseRepository, IdentityResolver, MeasurementRepository, ProfileRepository, VideoRepository,
};
pub use progress::{ProgressLog, ProgressSink, RunLog};
pub use random::{shuffle, RandomSource, ScriptedRandom, StdRandom};
pub use resolver::{relax, ExerciseResolver, MAX_RELAXATION_STEPS};
pub use selection::select_days;

use fitcoach_shared::AuthError;
use thiserror::Error;

/// Why a recommendation run was aborted
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// Query parameters failed validation
    #[error("{0}")]
    InvalidRequest(String),

    /// Missing profile, measurement or plan; the message is shown to the user
    #[error("{0}")]
    Precondition(String),

    #[error("{context}")]
    Repository {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl RecommendationError {
    pub fn repository(context: &'static str, source: anyhow::Error) -> Self {
        Self::Repository { context, source }
    }
}
