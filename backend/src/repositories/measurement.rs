//! Body measurement and weekly progress repository

use crate::db::decimal_to_f64;
use crate::services::recommendation::MeasurementRepository;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fitcoach_shared::classification::lean_muscle_mass;
use fitcoach_shared::{BodyMeasurementSnapshot, ProgressRecord};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Body measurement record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MeasurementRecord {
    pub id: i32,
    pub profile_id: i32,
    pub weight_kg: Decimal,
    pub body_fat_percent: Decimal,
    pub muscle_mass: Option<Decimal>,
    pub measured_at: DateTime<Utc>,
}

impl From<MeasurementRecord> for BodyMeasurementSnapshot {
    fn from(record: MeasurementRecord) -> Self {
        let weight_kg = decimal_to_f64(record.weight_kg);
        let body_fat_percent = decimal_to_f64(record.body_fat_percent);
        // Scales that cannot report muscle mass leave the column empty.
        let muscle_mass = record
            .muscle_mass
            .map(decimal_to_f64)
            .unwrap_or_else(|| lean_muscle_mass(weight_kg, body_fat_percent));

        BodyMeasurementSnapshot {
            id: record.id,
            weight_kg,
            body_fat_percent,
            muscle_mass,
            measured_at: record.measured_at,
        }
    }
}

/// Weekly progress record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProgressRow {
    pub id: i32,
    pub date: NaiveDate,
    pub measurement_id: i32,
}

impl From<ProgressRow> for ProgressRecord {
    fn from(row: ProgressRow) -> Self {
        ProgressRecord {
            id: row.id,
            date: row.date,
            measurement_id: row.measurement_id,
        }
    }
}

#[derive(Clone)]
pub struct PgMeasurementRepository {
    pool: PgPool,
}

impl PgMeasurementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Measurement `measurement_id`, only if it belongs to `profile_id`
    pub async fn find_for_profile(
        &self,
        measurement_id: i32,
        profile_id: i32,
    ) -> Result<Option<BodyMeasurementSnapshot>> {
        let record = sqlx::query_as::<_, MeasurementRecord>(
            r#"
            SELECT id, profile_id, weight_kg, body_fat_percent, muscle_mass, measured_at
            FROM body_measurements
            WHERE id = $1 AND profile_id = $2
            "#,
        )
        .bind(measurement_id)
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }
}

#[async_trait]
impl MeasurementRepository for PgMeasurementRepository {
    async fn get_recent_progress(&self, profile_id: i32, limit: usize) -> Result<Vec<ProgressRecord>> {
        let rows = sqlx::query_as::<_, ProgressRow>(
            r#"
            SELECT id, date, measurement_id
            FROM weekly_progress
            WHERE profile_id = $1
            ORDER BY date DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(profile_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_measurement(&self, measurement_id: i32) -> Result<Option<BodyMeasurementSnapshot>> {
        let record = sqlx::query_as::<_, MeasurementRecord>(
            r#"
            SELECT id, profile_id, weight_kg, body_fat_percent, muscle_mass, measured_at
            FROM body_measurements
            WHERE id = $1
            "#,
        )
        .bind(measurement_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(muscle_mass: Option<Decimal>) -> MeasurementRecord {
        MeasurementRecord {
            id: 8,
            profile_id: 1,
            weight_kg: Decimal::new(8000, 2),
            body_fat_percent: Decimal::new(200, 1),
            muscle_mass,
            measured_at: Utc::now(),
        }
    }

    #[test]
    fn test_stored_muscle_mass_is_kept() {
        let snapshot = BodyMeasurementSnapshot::from(record(Some(Decimal::new(6150, 2))));
        assert_eq!(snapshot.muscle_mass, 61.5);
        assert_eq!(snapshot.weight_kg, 80.0);
        assert_eq!(snapshot.body_fat_percent, 20.0);
    }

    #[test]
    fn test_missing_muscle_mass_is_derived() {
        let snapshot = BodyMeasurementSnapshot::from(record(None));
        assert!((snapshot.muscle_mass - 64.0).abs() < 1e-9);
    }
}
