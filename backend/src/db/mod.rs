//! Database pool, migrations and column conversions

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Pool tuning beyond what `DatabaseConfig` exposes
#[derive(Debug, Clone)]
pub struct PoolTuning {
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolTuning {
    fn default() -> Self {
        Self {
            min_connections: 2,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Create the PostgreSQL pool used by every repository
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    create_pool_with_tuning(config, &PoolTuning::default()).await
}

pub async fn create_pool_with_tuning(config: &DatabaseConfig, tuning: &PoolTuning) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .application_name("fitcoach");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(tuning.min_connections.min(config.max_connections))
        .acquire_timeout(tuning.acquire_timeout)
        .idle_timeout(tuning.idle_timeout)
        .max_lifetime(tuning.max_lifetime)
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    info!(
        max = config.max_connections,
        min = tuning.min_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Round-trip a trivial query
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ()).map_err(|e| {
        warn!(error = %e, "Database health check failed");
        e.into()
    })
}

/// NUMERIC columns are read as `Decimal` and handed to the domain as `f64`
#[inline]
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
