//! Exercise library repository

use crate::services::recommendation::ExerciseRepository;
use anyhow::Result;
use async_trait::async_trait;
use fitcoach_shared::{Exercise, ExerciseCriteria, MuscleGroupId};
use sqlx::PgPool;

/// Exercise record from database, with its muscle groups aggregated
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseRecord {
    pub id: i32,
    pub name: String,
    pub default_sets: Option<i32>,
    pub default_reps: Option<i32>,
    pub minutes: Option<i32>,
    pub muscle_group_ids: Vec<i32>,
}

impl From<ExerciseRecord> for Exercise {
    fn from(record: ExerciseRecord) -> Self {
        Exercise {
            id: record.id,
            name: record.name,
            default_sets: record.default_sets,
            default_reps: record.default_reps,
            minutes: record.minutes,
            muscle_group_ids: record.muscle_group_ids.into_iter().map(MuscleGroupId).collect(),
        }
    }
}

#[derive(Clone)]
pub struct PgExerciseRepository {
    pool: PgPool,
}

impl PgExerciseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExerciseRepository for PgExerciseRepository {
    /// Exercises of the given type and level, available in the environment
    /// and working at least one of the requested muscle groups
    async fn find(&self, criteria: &ExerciseCriteria) -> Result<Vec<Exercise>> {
        let muscle_groups: Vec<i32> = criteria.muscle_groups.iter().map(|g| g.0).collect();

        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT e.id, e.name, e.default_sets, e.default_reps, e.minutes,
                   ARRAY(
                       SELECT emg.muscle_group_id
                       FROM exercise_muscle_groups emg
                       WHERE emg.exercise_id = e.id
                       ORDER BY emg.muscle_group_id
                   ) AS muscle_group_ids
            FROM exercises e
            WHERE e.type_id = $1
              AND e.level_id = $2
              AND EXISTS (
                  SELECT 1 FROM exercise_workout_environments ewe
                  WHERE ewe.exercise_id = e.id AND ewe.workout_environment_id = $3
              )
              AND EXISTS (
                  SELECT 1 FROM exercise_muscle_groups emg
                  WHERE emg.exercise_id = e.id AND emg.muscle_group_id = ANY($4)
              )
            ORDER BY e.id
            "#,
        )
        .bind(criteria.exercise_type.id())
        .bind(criteria.experience_level)
        .bind(criteria.environment_id)
        .bind(&muscle_groups)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
