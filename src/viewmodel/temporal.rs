use time::OffsetDateTime;

use crate::model::Commit;

use super::scale::TimeScale;

pub const PROGRESS_MIN: f64 = 0.0;
pub const PROGRESS_MAX: f64 = 100.0;

/// Progressive time cutoff shared by the slider and the narrative.
///
/// Either drive leaves `max_time` as the single source of truth; the
/// working set is always every commit at or before it.
#[derive(Debug, Clone)]
pub struct TemporalFilter {
    progress: f64,
    scale: TimeScale,
    max_time: OffsetDateTime,
}

impl TemporalFilter {
    /// Start fully open: progress at 100, cutoff at the latest commit
    pub fn new(commits: &[Commit]) -> Self {
        let scale = TimeScale::from_extent(commits.iter().map(|c| c.datetime), (PROGRESS_MIN, PROGRESS_MAX));
        let max_time = scale.invert(PROGRESS_MAX);
        Self { progress: PROGRESS_MAX, scale, max_time }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn max_time(&self) -> OffsetDateTime {
        self.max_time
    }

    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    /// Slider drive: store progress and derive the cutoff from it
    pub fn set_progress(&mut self, progress: f64) -> OffsetDateTime {
        let progress = if progress.is_nan() { PROGRESS_MAX } else { progress };
        self.progress = progress.clamp(PROGRESS_MIN, PROGRESS_MAX);
        self.max_time = self.scale.invert(self.progress);
        self.max_time
    }

    /// Narrative drive: set the cutoff directly and move progress to match
    pub fn set_max_time(&mut self, max_time: OffsetDateTime) {
        self.max_time = max_time;
        self.progress = self.scale.apply(max_time).clamp(PROGRESS_MIN, PROGRESS_MAX);
    }

    pub fn includes(&self, commit: &Commit) -> bool {
        commit.datetime <= self.max_time
    }

    /// Indices of commits inside the cutoff, recomputed from scratch
    pub fn filter(&self, commits: &[Commit]) -> Vec<usize> {
        commits
            .iter()
            .enumerate()
            .filter(|(_, c)| self.includes(c))
            .map(|(i, _)| i)
            .collect()
    }
}
