//! In-memory collaborators for recommendation tests

use super::ports::{
    ExerciseRepository, IdentityResolver, MeasurementRepository, ProfileRepository, VideoRepository,
};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use fitcoach_shared::{
    AuthError, BodyMeasurementSnapshot, Exercise, ExerciseCriteria, ExerciseType, Gender, MuscleGroupId,
    Profile, ProgressRecord, Video,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub fn exercise(
    id: i32,
    name: &str,
    groups: &[i32],
    sets: Option<i32>,
    reps: Option<i32>,
    minutes: Option<i32>,
) -> Exercise {
    Exercise {
        id,
        name: name.to_string(),
        default_sets: sets,
        default_reps: reps,
        minutes,
        muscle_group_ids: groups.iter().map(|g| MuscleGroupId(*g)).collect(),
    }
}

/// Accepts `Bearer <uuid>` and nothing else
pub struct StaticIdentity;

impl IdentityResolver for StaticIdentity {
    fn resolve(&self, authorization: Option<&str>) -> Result<Uuid, AuthError> {
        let header = authorization.ok_or(AuthError::MissingToken)?;
        header
            .strip_prefix("Bearer ")
            .and_then(|token| Uuid::parse_str(token).ok())
            .ok_or(AuthError::InvalidToken)
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    profiles: Vec<Profile>,
}

impl InMemoryProfiles {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn get_by_user_id(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        Ok(self.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryMeasurements {
    /// Per profile, most recent first
    progress: HashMap<i32, Vec<ProgressRecord>>,
    measurements: HashMap<i32, BodyMeasurementSnapshot>,
}

impl InMemoryMeasurements {
    pub fn with_measurement(mut self, snapshot: BodyMeasurementSnapshot) -> Self {
        self.measurements.insert(snapshot.id, snapshot);
        self
    }

    /// Add a weekly progress entry and its measurement; call most recent first
    pub fn with_progress(mut self, profile_id: i32, snapshot: BodyMeasurementSnapshot) -> Self {
        let records = self.progress.entry(profile_id).or_default();
        records.push(ProgressRecord {
            id: records.len() as i32 + 1,
            date: snapshot.measured_at.date_naive(),
            measurement_id: snapshot.id,
        });
        self.measurements.insert(snapshot.id, snapshot);
        self
    }
}

#[async_trait]
impl MeasurementRepository for InMemoryMeasurements {
    async fn get_recent_progress(&self, profile_id: i32, limit: usize) -> anyhow::Result<Vec<ProgressRecord>> {
        Ok(self
            .progress
            .get(&profile_id)
            .map(|records| records.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_measurement(&self, measurement_id: i32) -> anyhow::Result<Option<BodyMeasurementSnapshot>> {
        Ok(self.measurements.get(&measurement_id).cloned())
    }
}

/// (exercise, type, level, environment)
pub type LibraryEntry = (Exercise, ExerciseType, i32, i32);

/// Exercise library that records every query it receives
#[derive(Clone, Default)]
pub struct InMemoryExercises {
    library: Arc<Vec<LibraryEntry>>,
    queries: Arc<Mutex<Vec<ExerciseCriteria>>>,
    failing: bool,
}

impl InMemoryExercises {
    pub fn new(library: Vec<LibraryEntry>) -> Self {
        Self {
            library: Arc::new(library),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<ExerciseCriteria> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryExercises {
    async fn find(&self, criteria: &ExerciseCriteria) -> anyhow::Result<Vec<Exercise>> {
        self.queries.lock().unwrap().push(criteria.clone());
        if self.failing {
            anyhow::bail!("exercise library unavailable");
        }
        Ok(self
            .library
            .iter()
            .filter(|(exercise, exercise_type, level, environment)| {
                *exercise_type == criteria.exercise_type
                    && *level == criteria.experience_level
                    && *environment == criteria.environment_id
                    && exercise
                        .muscle_group_ids
                        .iter()
                        .any(|g| criteria.muscle_groups.contains(g))
            })
            .map(|(exercise, ..)| exercise.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryVideos {
    videos: HashMap<i32, Vec<Video>>,
    failing: bool,
}

impl InMemoryVideos {
    pub fn with_video(exercise_id: i32, url: &str, thumbnail: &str) -> Self {
        let mut videos = HashMap::new();
        videos.insert(
            exercise_id,
            vec![Video {
                id: exercise_id * 100,
                exercise_id,
                url: url.to_string(),
                thumbnail: thumbnail.to_string(),
            }],
        );
        Self { videos, failing: false }
    }

    pub fn failing() -> Self {
        Self {
            videos: HashMap::new(),
            failing: true,
        }
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideos {
    async fn find_by_exercise(&self, exercise_id: i32) -> anyhow::Result<Vec<Video>> {
        if self.failing {
            anyhow::bail!("video service unavailable");
        }
        Ok(self.videos.get(&exercise_id).cloned().unwrap_or_default())
    }
}

pub fn profile(user_id: Uuid, dob: NaiveDate, gender: Gender, experience: i32, intensity: i32) -> Profile {
    Profile {
        id: 1,
        user_id,
        date_of_birth: dob,
        gender,
        height_cm: 180.0,
        experience_level: experience,
        intensity_level: intensity,
        baseline_measurement_id: Some(100),
    }
}

/// Snapshot taken `weeks_ago` weeks before a fixed reference date
pub fn snapshot(id: i32, weeks_ago: i64, weight_kg: f64, body_fat_percent: f64, muscle_mass: f64) -> BodyMeasurementSnapshot {
    let reference = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    BodyMeasurementSnapshot {
        id,
        weight_kg,
        body_fat_percent,
        muscle_mass,
        measured_at: reference - Duration::weeks(weeks_ago),
    }
}
