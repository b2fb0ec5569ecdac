use anyhow::{Context, Result};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, QueryBuilder, Row, Sqlite, Transaction};
use std::str::FromStr;
use time::{OffsetDateTime, UtcOffset};

use crate::model::LineEdit;

use super::SCHEMA_VERSION;

/// Database abstraction for SQLite operations
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection
    pub async fn new(db_path: &str) -> Result<Self> {
        // Configure connection options with PRAGMAs applied to every connection
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", db_path))?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .pragma("temp_store", "MEMORY")
            .pragma("cache_size", "-64000"); // 64MB cache

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        Ok(Self { pool })
    }

    /// Initialize database schema, returns true if schema was rebuilt
    pub async fn init_schema(&self) -> Result<bool> {
        // Create metadata table first (needed to check version)
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS metadata (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )"
        ).execute(&self.pool).await?;

        let stored_version: Option<String> = sqlx::query("SELECT value FROM metadata WHERE key = 'schema_version'")
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.get("value"));

        let needs_rebuild = stored_version.as_deref() != Some(SCHEMA_VERSION);

        if needs_rebuild {
            if let Some(old) = &stored_version {
                eprintln!("Schema version changed ({} -> {}), rebuilding index...", old, SCHEMA_VERSION);
            }
            sqlx::query("DROP TABLE IF EXISTS line_edits").execute(&self.pool).await?;
            sqlx::query("DELETE FROM metadata").execute(&self.pool).await?;
        }

        // One row per blamed line; seq keeps ingestion order
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS line_edits (
                seq INTEGER PRIMARY KEY,
                commit_id TEXT NOT NULL,
                file TEXT NOT NULL,
                line INTEGER NOT NULL,
                kind TEXT NOT NULL,
                depth INTEGER NOT NULL,
                length INTEGER NOT NULL,
                author TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                utc_offset INTEGER NOT NULL
            )"
        ).execute(&self.pool).await?;

        if needs_rebuild {
            sqlx::query("INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)")
                .bind(SCHEMA_VERSION)
                .execute(&self.pool)
                .await?;
        }

        Ok(needs_rebuild)
    }

    /// Get metadata value by key
    pub async fn get_metadata(&self, key: &str) -> Option<String> {
        sqlx::query("SELECT value FROM metadata WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .ok()
            .flatten()
            .map(|row| row.get("value"))
    }

    /// Set metadata value
    pub async fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO metadata (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Load every cached edit in the order it was saved
    pub async fn load_line_edits(&self) -> Result<Vec<LineEdit>> {
        let rows = sqlx::query(
            "SELECT commit_id, file, line, kind, depth, length, author, timestamp, utc_offset
             FROM line_edits ORDER BY seq"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let timestamp: i64 = row.get("timestamp");
                let offset: i32 = row.get("utc_offset");
                let datetime = OffsetDateTime::from_unix_timestamp(timestamp)
                    .context("Invalid cached timestamp")?
                    .to_offset(UtcOffset::from_whole_seconds(offset).context("Invalid cached offset")?);

                let edit = LineEdit::new(
                    row.get::<String, _>("commit_id"),
                    row.get::<String, _>("file"),
                    row.get::<i64, _>("line") as u32,
                    row.get::<String, _>("kind"),
                    row.get::<String, _>("author"),
                    datetime,
                )
                .with_shape(row.get::<i64, _>("depth") as u32, row.get::<i64, _>("length") as u32);
                Ok::<_, anyhow::Error>(edit)
            })
            .collect()
    }

    /// Number of cached edits
    pub async fn line_edit_count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM line_edits")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    /// Drop all cached edits
    pub async fn clear_line_edits(&self) -> Result<()> {
        sqlx::query("DELETE FROM line_edits").execute(&self.pool).await?;
        Ok(())
    }

    /// Replace the cached edits with `edits` in ONE transaction
    pub async fn save_line_edits<F>(&self, edits: &[LineEdit], mut on_progress: F) -> Result<()>
    where
        F: FnMut(usize),
    {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM line_edits").execute(&mut *tx).await?;
        self.save_line_edits_in_tx(&mut tx, edits, &mut on_progress).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn save_line_edits_in_tx<F>(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        edits: &[LineEdit],
        on_progress: &mut F,
    ) -> Result<()>
    where
        F: FnMut(usize),
    {
        // SQLite caps bound parameters per statement; 9 columns per row
        const BATCH_SIZE: usize = 3000;

        for chunk in edits.chunks(BATCH_SIZE) {
            if chunk.is_empty() {
                continue;
            }

            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO line_edits (commit_id, file, line, kind, depth, length, author, timestamp, utc_offset) "
            );
            qb.push_values(chunk, |mut row, edit| {
                row.push_bind(edit.commit_id.as_str())
                    .push_bind(edit.file.as_str())
                    .push_bind(edit.line as i64)
                    .push_bind(edit.kind.as_str())
                    .push_bind(edit.depth as i64)
                    .push_bind(edit.length as i64)
                    .push_bind(edit.author.as_str())
                    .push_bind(edit.datetime.unix_timestamp())
                    .push_bind(edit.timezone.whole_seconds());
            });
            qb.build().execute(&mut **tx).await?;

            on_progress(chunk.len());
        }

        Ok(())
    }
}
