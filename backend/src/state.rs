//! Application state management
//!
//! Shared state handed to every handler via Axum's state extraction.
//! Everything here is built once at startup and cheap to clone.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{
    PgExerciseRepository, PgMeasurementRepository, PgProfileRepository, PgVideoRepository,
};
use crate::services::recommendation::{ExerciseResolver, ProgressLog, RecommendationEngine};
use crate::services::FitnessService;
use anyhow::{Context, Result};
use fitcoach_shared::PlanCatalog;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Process-wide progress lines drained by the polling endpoint
    pub progress_log: ProgressLog,
    pub engine: Arc<RecommendationEngine>,
    pub fitness: FitnessService,
}

impl AppState {
    /// Build the state, loading the plan catalog named in the configuration
    /// or falling back to the built-in one.
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        let catalog = match &config.recommendation.catalog_path {
            Some(path) => {
                let catalog = PlanCatalog::from_path(path)
                    .with_context(|| format!("Failed to load plan catalog from {path}"))?;
                info!(path = %path, plans = catalog.plans().len(), "Loaded plan catalog");
                catalog
            }
            None => PlanCatalog::builtin().clone(),
        };

        Ok(Self::with_catalog(db, config, catalog))
    }

    /// Build the state around an already loaded catalog
    pub fn with_catalog(db: PgPool, config: AppConfig, catalog: PlanCatalog) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);

        let resolver = ExerciseResolver::new(
            Arc::new(PgExerciseRepository::new(db.clone())),
            Arc::new(PgVideoRepository::new(db.clone())),
        );
        let engine = RecommendationEngine::new(
            Arc::new(jwt.clone()),
            Arc::new(PgProfileRepository::new(db.clone())),
            Arc::new(PgMeasurementRepository::new(db.clone())),
            resolver,
            Arc::new(catalog),
        )
        .with_history_window(config.recommendation.history_window);

        Self {
            fitness: FitnessService::new(db.clone()),
            db,
            config: Arc::new(config),
            jwt,
            progress_log: ProgressLog::new(),
            engine: Arc::new(engine),
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
