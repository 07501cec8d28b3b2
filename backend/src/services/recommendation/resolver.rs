//! Exercise resolution for a single plan slot
//!
//! Queries the exercise library for the slot's criteria, drops exercises
//! already used that day and picks one at random. When nothing matches,
//! the criteria are widened step by step before giving up on the slot.

use super::ports::{ExerciseRepository, VideoRepository};
use super::random::{choose, RandomSource};
use fitcoach_shared::{Exercise, ExerciseCriteria, ResolvedExerciseDetail};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Relaxed retries after the initial query
pub const MAX_RELAXATION_STEPS: usize = 5;

/// Widen `criteria` for retry `step` (1-based). Odd steps flip the
/// exercise type; even steps flip it back and lower the level, and are
/// skipped entirely at level 1. Returns whether anything changed.
pub fn relax(criteria: &mut ExerciseCriteria, step: usize) -> bool {
    if step % 2 == 0 {
        if criteria.experience_level <= 1 {
            return false;
        }
        criteria.experience_level -= 1;
    }
    criteria.exercise_type = criteria.exercise_type.flipped();
    true
}

pub struct ExerciseResolver {
    exercises: Arc<dyn ExerciseRepository>,
    videos: Arc<dyn VideoRepository>,
}

impl ExerciseResolver {
    pub fn new(exercises: Arc<dyn ExerciseRepository>, videos: Arc<dyn VideoRepository>) -> Self {
        Self { exercises, videos }
    }

    /// Resolve one slot, recording the chosen exercise in `used`.
    ///
    /// Returns `None` when neither the original criteria nor any of the
    /// relaxed variants produce an unused exercise. Sets, reps and minutes
    /// are the exercise defaults.
    pub async fn resolve_slot(
        &self,
        criteria: ExerciseCriteria,
        used: &mut HashSet<i32>,
        rng: &mut dyn RandomSource,
    ) -> Option<ResolvedExerciseDetail> {
        let mut criteria = criteria;
        let mut step = 0;

        loop {
            let candidates = self.candidates(&criteria, used).await;
            if let Some(exercise) = choose(&candidates, rng) {
                used.insert(exercise.id);
                return Some(self.detail_for(exercise, rng).await);
            }

            // Steps that change nothing are consumed without re-querying.
            loop {
                if step == MAX_RELAXATION_STEPS {
                    debug!(
                        muscle_groups = ?criteria.muscle_groups,
                        "No exercise found for slot after relaxation"
                    );
                    return None;
                }
                step += 1;
                if relax(&mut criteria, step) {
                    debug!(
                        step,
                        exercise_type = ?criteria.exercise_type,
                        level = criteria.experience_level,
                        "Relaxing exercise criteria"
                    );
                    break;
                }
            }
        }
    }

    async fn candidates(&self, criteria: &ExerciseCriteria, used: &HashSet<i32>) -> Vec<Exercise> {
        match self.exercises.find(criteria).await {
            Ok(found) => found.into_iter().filter(|e| !used.contains(&e.id)).collect(),
            Err(e) => {
                warn!(error = %e, ?criteria, "Exercise query failed, treating as no match");
                Vec::new()
            }
        }
    }

    async fn detail_for(&self, exercise: &Exercise, rng: &mut dyn RandomSource) -> ResolvedExerciseDetail {
        let video = match self.videos.find_by_exercise(exercise.id).await {
            Ok(videos) => choose(&videos, rng).cloned(),
            Err(e) => {
                warn!(error = %e, exercise_id = exercise.id, "Video lookup failed");
                None
            }
        };

        let (video_url, thumbnail_url) = match video {
            Some(video) => (video.url, video.thumbnail),
            None => (
                format!("URL not found: {}", exercise.id),
                format!("Thumbnail not found: {}", exercise.id),
            ),
        };

        ResolvedExerciseDetail {
            exercise_id: exercise.id,
            sets: exercise.default_sets,
            reps: exercise.default_reps,
            minutes: exercise.minutes,
            video_url,
            thumbnail_url,
            display_name: exercise.name.clone(),
            muscle_group_ids: exercise.muscle_group_ids.clone(),
        }
    }
}
