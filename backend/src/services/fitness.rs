//! Body composition summary for a single measurement

use crate::error::{ApiError, ApiResult};
use crate::repositories::{PgMeasurementRepository, PgProfileRepository};
use crate::services::recommendation::ProfileRepository;
use chrono::{NaiveDate, Utc};
use fitcoach_shared::classification::{
    age_from_birth_date, body_fat_chart, classify_body_fat, classify_lean_mass, lean_mass_index,
};
use fitcoach_shared::{BodyMeasurementSnapshot, FitnessResultResponse, Profile};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct FitnessService {
    profiles: PgProfileRepository,
    measurements: PgMeasurementRepository,
}

impl FitnessService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            profiles: PgProfileRepository::new(pool.clone()),
            measurements: PgMeasurementRepository::new(pool),
        }
    }

    /// Summary of one of the caller's own measurements
    pub async fn result(&self, user_id: Uuid, measurement_id: i32) -> ApiResult<FitnessResultResponse> {
        let profile = self
            .profiles
            .get_by_user_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile does not exist".to_string()))?;

        let snapshot = self
            .measurements
            .find_for_profile(measurement_id, profile.id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Body measurement {measurement_id}")))?;

        Ok(summarize(&profile, &snapshot, Utc::now().date_naive()))
    }
}

/// Classify `snapshot` for `profile` with the age as of `today`
pub fn summarize(profile: &Profile, snapshot: &BodyMeasurementSnapshot, today: NaiveDate) -> FitnessResultResponse {
    let age = age_from_birth_date(profile.date_of_birth, today);
    let index = lean_mass_index(profile.height_cm, snapshot.weight_kg, snapshot.body_fat_percent);

    FitnessResultResponse {
        measurement_id: snapshot.id,
        age,
        body_fat_percent: snapshot.body_fat_percent,
        lean_muscle_mass: snapshot.muscle_mass,
        lean_mass_index: index,
        body_fat_classification: classify_body_fat(snapshot.body_fat_percent, age, profile.gender),
        lean_mass_classification: classify_lean_mass(index, profile.gender),
        body_fat_chart: body_fat_chart(age, profile.gender),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fitcoach_shared::{AgeGroup, BodyFatTier, Gender, LeanMassTier};

    #[test]
    fn test_summary_for_average_male() {
        let profile = Profile {
            id: 1,
            user_id: Uuid::new_v4(),
            date_of_birth: NaiveDate::from_ymd_opt(1999, 3, 1).unwrap(),
            gender: Gender::Male,
            height_cm: 180.0,
            experience_level: 1,
            intensity_level: 2,
            baseline_measurement_id: Some(5),
        };
        let snapshot = BodyMeasurementSnapshot {
            id: 5,
            weight_kg: 80.0,
            body_fat_percent: 15.0,
            muscle_mass: 68.0,
            measured_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        };

        let summary = summarize(&profile, &snapshot, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        assert_eq!(summary.age, 25);
        assert_eq!(summary.body_fat_classification, BodyFatTier::Average);
        assert_eq!(summary.lean_muscle_mass, 68.0);
        // 68 / 1.8^2 = 20.99
        assert_eq!(summary.lean_mass_index, 21.0);
        assert_eq!(summary.lean_mass_classification, LeanMassTier::IntermediateBuilt);
        assert_eq!(summary.body_fat_chart.age_group, AgeGroup::Under30);
        assert_eq!(summary.body_fat_chart.rows.len(), 6);
    }
}
