//! Domain models for the FitCoach application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Gender as stored on the profile ("M" / "F")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Single-letter storage code
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Gender::Male),
            "F" | "f" => Ok(Gender::Female),
            other => Err(format!("Unknown gender code: {other}")),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Exercise type used by plan slots and the exercise library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Compound,
    Isolation,
}

impl ExerciseType {
    /// Database identifier (`exercise_types.id`)
    pub fn id(&self) -> i32 {
        match self {
            ExerciseType::Compound => 1,
            ExerciseType::Isolation => 2,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(ExerciseType::Compound),
            2 => Some(ExerciseType::Isolation),
            _ => None,
        }
    }

    /// Compound <-> Isolation
    pub fn flipped(&self) -> Self {
        match self {
            ExerciseType::Compound => ExerciseType::Isolation,
            ExerciseType::Isolation => ExerciseType::Compound,
        }
    }
}

/// Muscle group identifier (`muscle_groups.id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MuscleGroupId(pub i32);

impl MuscleGroupId {
    pub const BICEPS: MuscleGroupId = MuscleGroupId(1);
    pub const SHOULDERS: MuscleGroupId = MuscleGroupId(2);
    pub const ABS: MuscleGroupId = MuscleGroupId(3);
    pub const QUADS: MuscleGroupId = MuscleGroupId(4);
    pub const TRAPS: MuscleGroupId = MuscleGroupId(5);
    pub const TRICEPS: MuscleGroupId = MuscleGroupId(6);
    pub const CALVES: MuscleGroupId = MuscleGroupId(7);
    pub const LATS: MuscleGroupId = MuscleGroupId(8);
    pub const CHEST: MuscleGroupId = MuscleGroupId(9);
    pub const UPPER_BACK: MuscleGroupId = MuscleGroupId(10);
    pub const GLUTES: MuscleGroupId = MuscleGroupId(11);
    /// Reserved: never intensity-limited, always scheduled last
    pub const CARDIO: MuscleGroupId = MuscleGroupId(12);
    pub const HAMSTRINGS: MuscleGroupId = MuscleGroupId(13);
    pub const FOREARM: MuscleGroupId = MuscleGroupId(14);

    #[inline]
    pub fn is_cardio(&self) -> bool {
        *self == Self::CARDIO
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Biceps",
            2 => "Shoulders",
            3 => "Abs",
            4 => "Quads",
            5 => "Traps",
            6 => "Triceps",
            7 => "Calves",
            8 => "Lats",
            9 => "Chest",
            10 => "Upper Back",
            11 => "Glutes",
            12 => "Cardio",
            13 => "Hamstrings",
            14 => "Forearm",
            _ => "Unknown",
        }
    }
}

/// User fitness profile (owned by the account service, read-only here)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i32,
    pub user_id: Uuid,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub height_cm: f64,
    /// 1 = Beginner, 2 = Intermediate, 3 = Advanced
    pub experience_level: i32,
    /// 1..=4
    pub intensity_level: i32,
    /// Measurement captured at sign-up
    pub baseline_measurement_id: Option<i32>,
}

/// A single body measurement capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurementSnapshot {
    pub id: i32,
    pub weight_kg: f64,
    pub body_fat_percent: f64,
    /// Lean muscle mass in kg
    pub muscle_mass: f64,
    pub measured_at: DateTime<Utc>,
}

/// Weekly progress entry pointing at the measurement taken that week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: i32,
    pub date: NaiveDate,
    pub measurement_id: i32,
}

/// Exercise as exposed by the exercise library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i32,
    pub name: String,
    pub default_sets: Option<i32>,
    pub default_reps: Option<i32>,
    /// Duration for cardio exercises
    pub minutes: Option<i32>,
    pub muscle_group_ids: Vec<MuscleGroupId>,
}

/// Demonstration video for an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: i32,
    pub exercise_id: i32,
    pub url: String,
    pub thumbnail: String,
}

/// Search criteria for one plan slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCriteria {
    pub exercise_type: ExerciseType,
    pub muscle_groups: Vec<MuscleGroupId>,
    pub experience_level: i32,
    pub environment_id: i32,
}

/// One concrete exercise placed in a daily routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedExerciseDetail {
    pub exercise_id: i32,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub minutes: Option<i32>,
    #[serde(rename = "videoURL")]
    pub video_url: String,
    #[serde(rename = "thumbnailURL")]
    pub thumbnail_url: String,
    pub display_name: String,
    pub muscle_group_ids: Vec<MuscleGroupId>,
}

impl ResolvedExerciseDetail {
    #[inline]
    pub fn is_cardio(&self) -> bool {
        self.muscle_group_ids.iter().any(MuscleGroupId::is_cardio)
    }
}

/// Recommended routine for one training day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRoutine {
    pub day_number: u32,
    pub exercise_details: Vec<ResolvedExerciseDetail>,
}
