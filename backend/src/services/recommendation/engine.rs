//! Daily routine recommendation
//!
//! Runs one recommendation end to end: identify the caller, load their
//! profile and recent measurements, classify body composition, pick and
//! adapt a base plan, then fill every selected day with concrete
//! exercises. Milestones are written to the run's [`ProgressSink`].

use super::ports::{IdentityResolver, MeasurementRepository, ProfileRepository};
use super::progress::ProgressSink;
use super::random::{shuffle, RandomSource};
use super::resolver::ExerciseResolver;
use super::selection::select_days;
use super::RecommendationError;
use chrono::{NaiveDate, Utc};
use fitcoach_shared::classification::{
    age_from_birth_date, classify_body_fat, classify_lean_mass, lean_mass_index,
};
use fitcoach_shared::trend::analyze_trend;
use fitcoach_shared::{
    BodyMeasurementSnapshot, DailyRoutine, ExerciseCriteria, Goal, PlanCatalog, PlanDay, Profile,
    ProgressRecord, RecommendationQuery, ResolvedExerciseDetail, Slot, TrendSignals,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const PROFILE_MISSING: &str = "Profile does not exist";
pub const MEASUREMENT_MISSING: &str = "Body measurement does not exist";
pub const NO_SUITABLE_PLAN: &str = "Cannot find a suitable plan.";

/// Extra reps added when lean mass is not improving
const REP_BUMP: i32 = 2;
/// Cardio duration multiplier when fat is not coming down
const CARDIO_MINUTES_FACTOR: i32 = 2;

/// Maximum non-cardio exercises per day for a working intensity
pub fn max_exercises_for_intensity(intensity: i32) -> usize {
    match intensity {
        1 => 4,
        2 => 5,
        3 => 6,
        _ => 7,
    }
}

/// Everything a run produced, beyond the routines themselves
#[derive(Debug, Clone)]
pub struct RecommendationOutcome {
    pub daily_routines: Vec<DailyRoutine>,
    pub goal: Goal,
    pub plan_level: i32,
    pub age: i32,
    /// Profile intensity after the age adjustment
    pub working_intensity: i32,
    pub max_exercises_per_day: usize,
    pub signals: TrendSignals,
}

/// Trend-driven adjustments applied to every day of one run
#[derive(Debug, Clone, Copy, Default)]
struct Adjustments {
    inject_cardio: bool,
    double_cardio_minutes: bool,
    add_two_reps: bool,
}

impl Adjustments {
    fn apply(&self, detail: &mut ResolvedExerciseDetail) {
        if self.add_two_reps {
            detail.reps = detail.reps.map(|reps| reps + REP_BUMP);
        }
        if self.double_cardio_minutes && detail.is_cardio() {
            detail.minutes = detail.minutes.map(|minutes| minutes * CARDIO_MINUTES_FACTOR);
        }
    }
}

pub struct RecommendationEngine {
    identity: Arc<dyn IdentityResolver>,
    profiles: Arc<dyn ProfileRepository>,
    measurements: Arc<dyn MeasurementRepository>,
    resolver: ExerciseResolver,
    catalog: Arc<PlanCatalog>,
    history_window: usize,
}

impl RecommendationEngine {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        profiles: Arc<dyn ProfileRepository>,
        measurements: Arc<dyn MeasurementRepository>,
        resolver: ExerciseResolver,
        catalog: Arc<PlanCatalog>,
    ) -> Self {
        Self {
            identity,
            profiles,
            measurements,
            resolver,
            catalog,
            history_window: fitcoach_shared::trend::TREND_WINDOW,
        }
    }

    /// Number of progress records read per run
    pub fn with_history_window(mut self, history_window: usize) -> Self {
        self.history_window = history_window.max(1);
        self
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    /// Recommend routines for the caller as of today (UTC)
    pub async fn recommend(
        &self,
        authorization: Option<&str>,
        query: &RecommendationQuery,
        log: &dyn ProgressSink,
        rng: &mut dyn RandomSource,
    ) -> Result<RecommendationOutcome, RecommendationError> {
        self.recommend_on(Utc::now().date_naive(), authorization, query, log, rng)
            .await
    }

    /// Recommend routines with ages computed as of `today`
    pub async fn recommend_on(
        &self,
        today: NaiveDate,
        authorization: Option<&str>,
        query: &RecommendationQuery,
        log: &dyn ProgressSink,
        rng: &mut dyn RandomSource,
    ) -> Result<RecommendationOutcome, RecommendationError> {
        log.clear();
        log.append("Analyzing profile...\n".to_string());

        // Load profile
        let user_id = self.identity.resolve(authorization)?;
        let profile = self
            .profiles
            .get_by_user_id(user_id)
            .await
            .map_err(|e| RecommendationError::repository("Failed to load profile", e))?
            .ok_or_else(|| RecommendationError::Precondition(PROFILE_MISSING.to_string()))?;

        // Load history
        let progress = self
            .measurements
            .get_recent_progress(profile.id, self.history_window)
            .await
            .map_err(|e| RecommendationError::repository("Failed to load progress history", e))?;
        let current = self.current_measurement(&profile, &progress).await?;

        // Classify
        let age = age_from_birth_date(profile.date_of_birth, today);
        let body_fat_tier = classify_body_fat(current.body_fat_percent, age, profile.gender);
        let index = lean_mass_index(profile.height_cm, current.weight_kg, current.body_fat_percent);
        let lean_mass_tier = classify_lean_mass(index, profile.gender);
        debug!(
            profile_id = profile.id,
            age,
            body_fat = current.body_fat_percent,
            lean_mass_index = index,
            ?body_fat_tier,
            ?lean_mass_tier,
            "Classified body composition"
        );
        log.append(format!(
            "Analyzing your fitness ratings:\nBody Fat: \"{}\", FFMI: \"{}\"\n",
            body_fat_tier.label(),
            lean_mass_tier.label()
        ));
        log.append(format!("Analyzing your age group: {} yrs old...\n", age));

        let working_intensity = working_intensity(profile.intensity_level, age, log);

        log.append("Setting the number of daily exercises based on your fitness level...\n".to_string());
        let max_exercises_per_day = max_exercises_for_intensity(working_intensity);

        // Goal and plan
        let goal = Goal::for_body_fat_tier(body_fat_tier)
            .ok_or_else(|| RecommendationError::Precondition(NO_SUITABLE_PLAN.to_string()))?;
        let plan = self
            .catalog
            .select(goal, profile.gender, profile.experience_level)
            .ok_or_else(|| RecommendationError::Precondition(NO_SUITABLE_PLAN.to_string()))?;
        log.append(format!(
            "Selecting the best workout plan for you: \n{}\n",
            plan.describe()
        ));

        let days_per_week = query.days_per_week as usize;
        log.append(format!(
            "Scheduling your daily routines based on a {}-day(s) period...\n",
            days_per_week
        ));
        let selected_days = select_days(&plan.days, days_per_week, rng);

        // Trend signals
        let signals = if progress.is_empty() {
            TrendSignals::default()
        } else {
            log.append("Calculating your recent Body Fat and Body Mass changes...\n".to_string());
            let window = self.trend_window(&progress, &current).await;
            analyze_trend(&window, body_fat_tier, lean_mass_tier)
        };

        log.append("Fetching the best exercises that match your level and environment...\n".to_string());
        let adjustments = Adjustments {
            inject_cardio: signals.fat_decreasing.is_not_improving(),
            double_cardio_minutes: signals.fat_decreasing.is_not_improving()
                && selected_days.iter().any(|day| day.has_cardio()),
            add_two_reps: signals.lean_mass_increasing.is_not_improving(),
        };
        if adjustments.inject_cardio {
            log.append("Need to put more work on fat loss, adding/modifying cardio exercise...\n".to_string());
        }
        if adjustments.add_two_reps {
            log.append("Need to put more work on building muscle, adding reps to exercises...\n".to_string());
        }

        let mut daily_routines = Vec::with_capacity(selected_days.len());
        for (index, day) in selected_days.iter().enumerate() {
            let details = self
                .resolve_day(
                    day,
                    plan.level,
                    query.workout_environment_id,
                    adjustments,
                    max_exercises_per_day,
                    rng,
                )
                .await;

            if details.is_empty() {
                warn!(plan_day = day.day, "No exercises resolved for day, omitting it");
                continue;
            }
            daily_routines.push(DailyRoutine {
                day_number: index as u32 + 1,
                exercise_details: details,
            });
        }

        if signals.overtraining_suspected() {
            log.append(
                "Warning: Both of your body fat and body mass are declining the past weeks, \
                 you might have overtrained, we suggest you to take a break for a week.\n"
                    .to_string(),
            );
        }

        log.append("Putting the recommended exercises together...\n".to_string());
        log.append("Recommendations completed.".to_string());

        info!(
            profile_id = profile.id,
            goal = ?goal,
            plan_level = plan.level,
            days = daily_routines.len(),
            working_intensity,
            "Recommendation completed"
        );

        Ok(RecommendationOutcome {
            daily_routines,
            goal,
            plan_level: plan.level,
            age,
            working_intensity,
            max_exercises_per_day,
            signals,
        })
    }

    /// Measurement of the latest progress record, or the profile baseline
    async fn current_measurement(
        &self,
        profile: &Profile,
        progress: &[ProgressRecord],
    ) -> Result<BodyMeasurementSnapshot, RecommendationError> {
        let measurement_id = progress
            .first()
            .map(|record| record.measurement_id)
            .or(profile.baseline_measurement_id)
            .ok_or_else(|| RecommendationError::Precondition(MEASUREMENT_MISSING.to_string()))?;

        self.measurements
            .get_measurement(measurement_id)
            .await
            .map_err(|e| RecommendationError::repository("Failed to load body measurement", e))?
            .ok_or_else(|| RecommendationError::Precondition(MEASUREMENT_MISSING.to_string()))
    }

    /// Snapshots behind the progress records, most recent first. Records
    /// whose measurement cannot be read are left out of the window.
    async fn trend_window(
        &self,
        progress: &[ProgressRecord],
        current: &BodyMeasurementSnapshot,
    ) -> Vec<BodyMeasurementSnapshot> {
        let mut window = Vec::with_capacity(progress.len());
        for record in progress {
            if record.measurement_id == current.id {
                window.push(current.clone());
                continue;
            }
            match self.measurements.get_measurement(record.measurement_id).await {
                Ok(Some(snapshot)) => window.push(snapshot),
                Ok(None) => warn!(measurement_id = record.measurement_id, "Progress measurement missing"),
                Err(e) => warn!(
                    error = %e,
                    measurement_id = record.measurement_id,
                    "Failed to load progress measurement"
                ),
            }
        }
        window
    }

    async fn resolve_day(
        &self,
        day: &PlanDay,
        plan_level: i32,
        environment_id: i32,
        adjustments: Adjustments,
        max_exercises_per_day: usize,
        rng: &mut dyn RandomSource,
    ) -> Vec<ResolvedExerciseDetail> {
        let mut slots = day.slots.clone();
        if adjustments.inject_cardio && !day.has_cardio() {
            slots.push(Slot::cardio());
        }

        let mut used = HashSet::new();
        let mut details = Vec::with_capacity(slots.len());
        for slot in slots {
            let criteria = ExerciseCriteria {
                exercise_type: slot.exercise_type,
                muscle_groups: slot.muscle_groups,
                experience_level: plan_level,
                environment_id,
            };
            if let Some(mut detail) = self.resolver.resolve_slot(criteria, &mut used, rng).await {
                adjustments.apply(&mut detail);
                details.push(detail);
            }
        }

        shuffle(&mut details, rng);
        let (cardio, mut ordered): (Vec<_>, Vec<_>) =
            details.into_iter().partition(ResolvedExerciseDetail::is_cardio);
        ordered.truncate(max_exercises_per_day);
        ordered.extend(cardio);
        ordered
    }
}

/// Over-50s and under-18s train one intensity level lower (never below 1)
fn working_intensity(intensity: i32, age: i32, log: &dyn ProgressSink) -> i32 {
    if intensity <= 1 {
        return intensity;
    }
    if age > 50 {
        log.append("Age over 50, decreasing intensity...\n".to_string());
        intensity - 1
    } else if age < 18 {
        log.append("Age under 18, decreasing intensity...\n".to_string());
        intensity - 1
    } else {
        intensity
    }
}
