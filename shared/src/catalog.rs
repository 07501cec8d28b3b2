//! Base workout plan catalog
//!
//! The eight base weekly plans live in `data/base_plans.json` and are
//! embedded at compile time. The parsed catalog is built once and shared;
//! callers only ever see it through shared references.

use crate::classification::BodyFatTier;
use crate::models::{ExerciseType, Gender, MuscleGroupId};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Embedded plan definitions (single source of truth)
const BASE_PLANS_JSON: &str = include_str!("../data/base_plans.json");

static BUILTIN_CATALOG: Lazy<PlanCatalog> = Lazy::new(|| {
    PlanCatalog::from_json(BASE_PLANS_JSON).expect("embedded base plan catalog must be valid")
});

/// Errors raised while loading a plan catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read plan catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed plan catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid plan catalog: {0}")]
    Invalid(String),
}

/// Training goal derived from the body-fat tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    BuildMuscle,
}

impl Goal {
    /// Average and worse tiers train for fat loss, leaner tiers for muscle.
    /// Out-of-range measurements have no goal.
    pub fn for_body_fat_tier(tier: BodyFatTier) -> Option<Self> {
        match tier {
            BodyFatTier::Average | BodyFatTier::BelowAverage | BodyFatTier::Poor => Some(Goal::FatLoss),
            BodyFatTier::Fit | BodyFatTier::Athletes | BodyFatTier::EssentialFat => Some(Goal::BuildMuscle),
            BodyFatTier::OutOfRange => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Goal::FatLoss => "Fat Loss",
            Goal::BuildMuscle => "Build Muscle",
        }
    }
}

/// Display name for an experience level
pub fn level_label(level: i32) -> &'static str {
    match level {
        1 => "Beginner",
        2 => "Intermediate",
        3 => "Advanced",
        _ => "Unknown",
    }
}

/// One exercise requirement within a plan day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub muscle_groups: Vec<MuscleGroupId>,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
}

impl Slot {
    /// Synthetic slot injected when a day needs extra cardio
    pub fn cardio() -> Self {
        Self {
            muscle_groups: vec![MuscleGroupId::CARDIO],
            exercise_type: ExerciseType::Compound,
        }
    }

    #[inline]
    pub fn is_cardio(&self) -> bool {
        self.muscle_groups.iter().any(MuscleGroupId::is_cardio)
    }
}

/// Ordered slots for one training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    pub day: u32,
    pub slots: Vec<Slot>,
}

impl PlanDay {
    pub fn has_cardio(&self) -> bool {
        self.slots.iter().any(Slot::is_cardio)
    }

    /// Number of different muscle groups the day touches
    pub fn distinct_muscle_groups(&self) -> usize {
        self.slots
            .iter()
            .flat_map(|slot| slot.muscle_groups.iter().copied())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// A base weekly plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePlan {
    pub goal: Goal,
    /// Experience level (always 1 for fat-loss plans)
    pub level: i32,
    pub gender: Gender,
    pub days: Vec<PlanDay>,
}

impl BasePlan {
    /// e.g. "Build Muscle for Male, Intermediate level"
    pub fn describe(&self) -> String {
        format!(
            "{} for {}, {} level",
            self.goal.label(),
            self.gender.label(),
            level_label(self.level)
        )
    }
}

/// Immutable collection of base plans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCatalog {
    plans: Vec<BasePlan>,
}

impl PlanCatalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> &'static PlanCatalog {
        &BUILTIN_CATALOG
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let plans: Vec<BasePlan> = serde_json::from_str(json)?;
        let catalog = Self { plans };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn plans(&self) -> &[BasePlan] {
        &self.plans
    }

    /// Look up the plan for a goal, gender and experience level.
    ///
    /// Fat-loss plans exist once per gender and match any level;
    /// build-muscle plans must match the level exactly.
    pub fn select(&self, goal: Goal, gender: Gender, level: i32) -> Option<&BasePlan> {
        self.plans.iter().find(|plan| {
            plan.goal == goal
                && plan.gender == gender
                && (goal == Goal::FatLoss || plan.level == level)
        })
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.plans.is_empty() {
            return Err(CatalogError::Invalid("catalog contains no plans".to_string()));
        }

        let mut seen = HashSet::new();
        for plan in &self.plans {
            let key = (plan.goal, plan.gender, plan.level);
            if !seen.insert(key) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate plan: {}",
                    plan.describe()
                )));
            }
            if !(1..=3).contains(&plan.level) {
                return Err(CatalogError::Invalid(format!(
                    "plan level {} out of range",
                    plan.level
                )));
            }
            if plan.days.is_empty() {
                return Err(CatalogError::Invalid(format!("{} has no days", plan.describe())));
            }
            if let Some(day) = plan
                .days
                .iter()
                .find(|day| day.slots.is_empty() || day.slots.iter().any(|s| s.muscle_groups.is_empty()))
            {
                return Err(CatalogError::Invalid(format!(
                    "{} day {} has an empty slot list or slot",
                    plan.describe(),
                    day.day
                )));
            }
        }
        Ok(())
    }
}
