use time::OffsetDateTime;

use crate::model::Commit;
use crate::util::format_full_datetime;

use super::selection::Selectable;

/// One scroll step of the commit-by-commit story
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeStep {
    pub commit_index: usize,
    pub id: String,
    pub url: String,
    pub datetime: OffsetDateTime,
    pub is_first: bool,
    pub total_lines: usize,
    pub file_count: usize,
}

impl NarrativeStep {
    /// The sentence shown for this step
    pub fn sentence(&self) -> String {
        let what = if self.is_first {
            "my first commit, and it was glorious"
        } else {
            "another glorious commit"
        };
        format!(
            "On {}, I made {}. I edited {} lines across {} files. \
             Then I looked over all I had made, and I saw that it was very good.",
            format_full_datetime(self.datetime),
            what,
            self.total_lines,
            self.file_count,
        )
    }
}

/// ViewModel for the scroll-driven narrative
pub struct NarrativeViewModel {
    steps: Vec<NarrativeStep>,
    selected_index: usize,
}

impl NarrativeViewModel {
    pub fn new(commits: &[Commit]) -> Self {
        let mut order: Vec<usize> = (0..commits.len()).collect();
        // Stable: commits sharing a timestamp keep ingestion order
        order.sort_by_key(|&i| commits[i].datetime);

        let steps = order
            .into_iter()
            .enumerate()
            .map(|(position, i)| {
                let c = &commits[i];
                NarrativeStep {
                    commit_index: i,
                    id: c.id.clone(),
                    url: c.url.clone(),
                    datetime: c.datetime,
                    is_first: position == 0,
                    total_lines: c.total_lines(),
                    file_count: c.file_count(),
                }
            })
            .collect();

        Self { steps, selected_index: 0 }
    }

    pub fn steps(&self) -> &[NarrativeStep] {
        &self.steps
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// The step currently in view
    pub fn current(&self) -> Option<&NarrativeStep> {
        self.steps.get(self.selected_index)
    }

    /// Cutoff instant implied by the step in view
    pub fn current_cutoff(&self) -> Option<OffsetDateTime> {
        self.current().map(|s| s.datetime)
    }
}

impl Selectable for NarrativeViewModel {
    fn len(&self) -> usize {
        self.steps.len()
    }

    fn selected(&self) -> usize {
        self.selected_index
    }

    fn set_selected(&mut self, index: usize) {
        self.selected_index = index;
    }
}
