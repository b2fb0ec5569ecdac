use anyhow::Result;
use serde::Serialize;

use super::{Commit, SummaryStats};

/// Everything `--json` prints: the aggregated commits and corpus statistics
#[derive(Debug, Serialize)]
pub struct Export<'a> {
    pub stats: &'a SummaryStats,
    pub commits: &'a [Commit],
}

impl<'a> Export<'a> {
    pub fn new(commits: &'a [Commit], stats: &'a SummaryStats) -> Self {
        Self { stats, commits }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
