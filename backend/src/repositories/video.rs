//! Exercise video repository

use crate::services::recommendation::VideoRepository;
use anyhow::Result;
use async_trait::async_trait;
use fitcoach_shared::Video;
use sqlx::PgPool;

/// Video record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VideoRecord {
    pub id: i32,
    pub exercise_id: i32,
    pub url: String,
    pub thumbnail: String,
}

impl From<VideoRecord> for Video {
    fn from(record: VideoRecord) -> Self {
        Video {
            id: record.id,
            exercise_id: record.exercise_id,
            url: record.url,
            thumbnail: record.thumbnail,
        }
    }
}

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn find_by_exercise(&self, exercise_id: i32) -> Result<Vec<Video>> {
        let records = sqlx::query_as::<_, VideoRecord>(
            r#"
            SELECT id, exercise_id, url, thumbnail
            FROM videos
            WHERE exercise_id = $1
            ORDER BY id
            "#,
        )
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
