use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use time::{Date, OffsetDateTime, Time, UtcOffset};

use super::LineEdit;

/// A group of line edits sharing one commit id
#[derive(Debug, Clone, Serialize)]
pub struct Commit {
    pub id: String,
    pub url: String,
    pub author: String,
    pub date: Date,
    pub time: Time,
    pub timezone: UtcOffset,
    #[serde(with = "time::serde::rfc3339")]
    pub datetime: OffsetDateTime,
    /// Hour of day plus minutes as a fraction, in `[0, 24)`
    pub hour_frac: f64,
    /// Serialized as its count only
    #[serde(rename = "total_lines", serialize_with = "serialize_line_count")]
    lines: Vec<LineEdit>,
}

fn serialize_line_count<S: Serializer>(lines: &[LineEdit], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(lines.len() as u64)
}

impl Commit {
    fn from_group(id: String, url_base: &str, lines: Vec<LineEdit>) -> Option<Self> {
        let first = lines.first()?;
        let commit = Self {
            url: format!("{}{}", url_base, id),
            author: first.author.clone(),
            date: first.date,
            time: first.time,
            timezone: first.timezone,
            datetime: first.datetime,
            hour_frac: hour_fraction(first.datetime),
            id,
            lines,
        };
        Some(commit)
    }

    /// The edits making up this commit, in ingestion order
    pub fn lines(&self) -> &[LineEdit] {
        &self.lines
    }

    #[inline]
    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// Number of distinct files touched by this commit
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&str> = self.lines.iter().map(|l| l.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }

    /// The synthetic commit standing for not-yet-committed state
    #[inline]
    pub fn is_root(&self) -> bool {
        is_root_id(&self.id)
    }
}

/// Whether `id` is the synthetic all-zero commit id
pub fn is_root_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c == '0')
}

/// Fractional hour of day in the instant's own offset
pub fn hour_fraction(datetime: OffsetDateTime) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

/// Group edits into commits, keeping the order in which commit ids first appear.
/// The first edit of each group supplies author and timestamps.
pub fn aggregate_commits(edits: &[LineEdit], url_base: &str) -> Vec<Commit> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(String, Vec<LineEdit>)> = Vec::new();

    for edit in edits {
        let slot = *index.entry(edit.commit_id.as_str()).or_insert_with(|| {
            groups.push((edit.commit_id.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(edit.clone());
    }

    groups
        .into_iter()
        .filter_map(|(id, lines)| Commit::from_group(id, url_base, lines))
        .collect()
}
