//! Profile repository

use crate::db::decimal_to_f64;
use crate::services::recommendation::ProfileRepository;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use fitcoach_shared::{Gender, Profile};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub id: i32,
    pub user_id: Uuid,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub height_cm: Decimal,
    pub experience_level: i32,
    pub intensity_level: i32,
    pub baseline_measurement_id: Option<i32>,
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = anyhow::Error;

    fn try_from(record: ProfileRecord) -> Result<Self> {
        let gender: Gender = record
            .gender
            .trim()
            .parse()
            .map_err(|e| anyhow!("Profile {}: {}", record.id, e))?;

        Ok(Profile {
            id: record.id,
            user_id: record.user_id,
            date_of_birth: record.date_of_birth,
            gender,
            height_cm: decimal_to_f64(record.height_cm),
            experience_level: record.experience_level,
            intensity_level: record.intensity_level,
            baseline_measurement_id: record.baseline_measurement_id,
        })
    }
}

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT id, user_id, date_of_birth, gender, height_cm, experience_level,
                   intensity_level, baseline_measurement_id
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(Profile::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gender: &str) -> ProfileRecord {
        ProfileRecord {
            id: 3,
            user_id: Uuid::new_v4(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
            gender: gender.to_string(),
            height_cm: Decimal::new(1725, 1),
            experience_level: 2,
            intensity_level: 3,
            baseline_measurement_id: None,
        }
    }

    #[test]
    fn test_record_conversion() {
        let profile = Profile::try_from(record("F")).unwrap();
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.height_cm, 172.5);
        assert_eq!(profile.experience_level, 2);
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        assert!(Profile::try_from(record("X")).is_err());
    }
}
