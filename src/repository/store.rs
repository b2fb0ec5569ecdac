//! Edit store trait for the ingestion cache
//!
//! The scanner only needs "is HEAD cached", "load" and "replace", so the
//! blame pass can run against the SQLite cache or against nothing at all.

use anyhow::Result;

use crate::model::LineEdit;

use super::Database;
use super::progress::ProgressReporter;

/// Persistence layer for blamed edits
#[allow(async_fn_in_trait)]
pub trait EditStore {
    /// Get the HEAD OID the cached edits were blamed at, if any
    async fn get_head_oid(&self) -> Option<String>;

    /// Record the HEAD OID the cached edits belong to
    async fn set_head_oid(&self, oid_hex: &str) -> Result<()>;

    /// Load the cached edits in ingestion order
    async fn load_edits(&self) -> Result<Vec<LineEdit>>;

    /// Replace the cached edits
    async fn replace_edits(&self, edits: &[LineEdit], progress: &dyn ProgressReporter) -> Result<()>;
}

impl EditStore for Database {
    async fn get_head_oid(&self) -> Option<String> {
        self.get_metadata("head_oid").await
    }

    async fn set_head_oid(&self, oid_hex: &str) -> Result<()> {
        self.set_metadata("head_oid", oid_hex).await
    }

    async fn load_edits(&self) -> Result<Vec<LineEdit>> {
        self.load_line_edits().await
    }

    async fn replace_edits(&self, edits: &[LineEdit], progress: &dyn ProgressReporter) -> Result<()> {
        let pb = progress.start("Caching", edits.len() as u64);
        self.save_line_edits(edits, |n| pb.inc(n as u64)).await?;
        pb.finish();
        Ok(())
    }
}

/// Store that caches nothing, used for `--no-cache` and uncommitted scans
pub struct NoStore;

impl EditStore for NoStore {
    async fn get_head_oid(&self) -> Option<String> {
        None
    }

    async fn set_head_oid(&self, _oid_hex: &str) -> Result<()> {
        Ok(())
    }

    async fn load_edits(&self) -> Result<Vec<LineEdit>> {
        Ok(Vec::new())
    }

    async fn replace_edits(&self, _edits: &[LineEdit], _progress: &dyn ProgressReporter) -> Result<()> {
        Ok(())
    }
}
