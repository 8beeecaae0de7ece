use chrono::{DateTime, Utc};
use sqlx::AnyPool;

use crate::models::Paste;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS paste (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    paste_id TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL,
    language TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
)";

/// Handle to the paste store, passed explicitly wherever persistence is
/// needed. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    /// Connect to a database by URL.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            pool: AnyPool::connect(url).await?,
        })
    }

    /// Connect to a fresh in-memory sqlite database with the schema applied.
    ///
    /// The pool is capped at a single connection since every sqlite
    /// `:memory:` connection is its own database.
    #[cfg(feature = "sqlite")]
    pub async fn connect_in_memory() -> anyhow::Result<Self> {
        let pool = sqlx::any::AnyPoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Create the paste table if it does not exist yet.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Whether a paste with this identifier exists.
    pub async fn paste_exists(&self, paste_id: &str) -> crate::ApiResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM paste WHERE paste_id = ?")
            .bind(paste_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Get a paste by identifier.
    pub async fn get_paste(&self, paste_id: &str) -> crate::ApiResult<Paste> {
        let paste = sqlx::query_as::<_, Paste>(
            "SELECT id, paste_id, content, language, created_at FROM paste WHERE paste_id = ?",
        )
        .bind(paste_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(paste)
    }

    /// Insert a paste, returning the persisted record including the
    /// store-assigned surrogate key.
    pub async fn insert_paste(
        &self,
        paste_id: &str,
        content: &str,
        language: &str,
        created_at: DateTime<Utc>,
    ) -> crate::ApiResult<Paste> {
        let paste = sqlx::query_as::<_, Paste>(
            "INSERT INTO paste (paste_id, content, language, created_at) VALUES (?, ?, ?, ?) \
             RETURNING id, paste_id, content, language, created_at",
        )
        .bind(paste_id)
        .bind(content)
        .bind(language)
        .bind(created_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;
        Ok(paste)
    }
}
