use time::OffsetDateTime;

use crate::config::Config;
use crate::model::{Commit, LineEdit, SummaryStats, aggregate_commits};

use super::brush::{Breakdown, BrushPhase, BrushRect, Selection};
use super::files_viewmodel::FilesViewModel;
use super::scale::TimeScale;
use super::scatter::{AxisTick, PlotArea, PlotPoint, PointDiff, ScatterLayer, ScatterProjection};
use super::temporal::TemporalFilter;

/// Hovered commit and the terminal cell the pointer was last seen at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub commit_index: usize,
    pub column: u16,
    pub row: u16,
}

/// Shared view state for the scatter plot, brush, slider and file listing.
///
/// Every handler takes `&mut self`; nothing here is global, so the whole
/// pipeline can be driven without a terminal.
pub struct TimelineViewModel {
    commits: Vec<Commit>,
    stats: SummaryStats,
    projection: ScatterProjection,
    full_x: TimeScale,
    rescale_x_on_filter: bool,
    filter: TemporalFilter,
    filtered: Vec<usize>,
    layer: ScatterLayer,
    last_diff: PointDiff,
    brush_anchor: Option<(f64, f64)>,
    selection: Selection,
    breakdown: Breakdown,
    hover: Option<Hover>,
    files: FilesViewModel,
}

impl TimelineViewModel {
    pub fn new(edits: &[LineEdit], config: &Config) -> Self {
        let commits = aggregate_commits(edits, &config.url_base);
        let stats = SummaryStats::compute(edits, &commits);
        Self::from_commits(commits, stats, config)
    }

    pub fn from_commits(commits: Vec<Commit>, stats: SummaryStats, config: &Config) -> Self {
        let projection = ScatterProjection::new(&commits, PlotArea::default(), config.root_policy);
        let full_x = *projection.x_scale();
        let filter = TemporalFilter::new(&commits);
        let breakdown = Breakdown::for_selection(&Selection::Absent, &commits);

        let mut vm = Self {
            commits,
            stats,
            projection,
            full_x,
            rescale_x_on_filter: config.rescale_x_on_filter,
            filter,
            filtered: Vec::new(),
            layer: ScatterLayer::default(),
            last_diff: PointDiff::default(),
            brush_anchor: None,
            selection: Selection::Absent,
            breakdown,
            hover: None,
            files: FilesViewModel::new(),
        };
        vm.apply_filter();
        vm
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn stats(&self) -> &SummaryStats {
        &self.stats
    }

    pub fn area(&self) -> &PlotArea {
        self.projection.area()
    }

    pub fn projection(&self) -> &ScatterProjection {
        &self.projection
    }

    /// Commits inside the current time cutoff
    pub fn filtered_commits(&self) -> impl Iterator<Item = &Commit> + '_ {
        self.filtered.iter().map(|&i| &self.commits[i])
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn points(&self) -> &[PlotPoint] {
        self.layer.points()
    }

    pub fn is_entering(&self, id: &str) -> bool {
        self.layer.is_entering(id)
    }

    pub fn last_diff(&self) -> &PointDiff {
        &self.last_diff
    }

    pub fn x_ticks(&self, count: usize) -> Vec<AxisTick> {
        self.projection.x_ticks(count)
    }

    pub fn y_ticks(&self) -> Vec<AxisTick> {
        self.projection.y_ticks(2.0)
    }

    pub fn progress(&self) -> f64 {
        self.filter.progress()
    }

    pub fn max_time(&self) -> OffsetDateTime {
        self.filter.max_time()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    pub fn count_message(&self) -> String {
        self.selection.count_message()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(index)
    }

    pub fn files(&self) -> &FilesViewModel {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut FilesViewModel {
        &mut self.files
    }

    /// Hovered commit for the tooltip, with the pointer cell
    pub fn tooltip(&self) -> Option<(&Commit, Hover)> {
        self.hover
            .and_then(|h| self.commits.get(h.commit_index).map(|c| (c, h)))
    }

    /// Slider drive
    pub fn set_progress(&mut self, progress: f64) {
        self.filter.set_progress(progress);
        self.apply_filter();
    }

    pub fn nudge_progress(&mut self, delta: f64) {
        self.set_progress(self.filter.progress() + delta);
    }

    /// Narrative drive
    pub fn set_max_time(&mut self, max_time: OffsetDateTime) {
        self.filter.set_max_time(max_time);
        self.apply_filter();
    }

    /// Recompute everything downstream of the time cutoff
    fn apply_filter(&mut self) {
        self.filtered = self.filter.filter(&self.commits);

        let filtered = self.filtered.iter().map(|&i| &self.commits[i]);
        self.projection.resize_to(filtered);

        if self.rescale_x_on_filter {
            self.projection.set_x_scale(self.full_x);
            let plotted = self.filtered.iter().map(|&i| &self.commits[i]).filter(|c| !c.is_root());
            self.projection.fit_x(plotted);
        }

        let points = self
            .projection
            .project(self.filtered.iter().map(|&i| (i, &self.commits[i])));
        self.last_diff = self.layer.rebind(points);

        self.files.rebuild(self.filtered.iter().map(|&i| &self.commits[i]));

        if let Some(hover) = self.hover {
            if !self.points().iter().any(|p| p.index == hover.commit_index) {
                self.hover = None;
            }
        }

        self.refresh_selection();
    }

    /// Brush gesture in plot coordinates
    pub fn brush(&mut self, phase: BrushPhase, x: f64, y: f64) {
        match phase {
            BrushPhase::Start => {
                self.brush_anchor = Some((x, y));
                self.selection = Selection::over(BrushRect::from_corners((x, y), (x, y)), self.layer.points());
            }
            BrushPhase::Move | BrushPhase::End => {
                let Some(anchor) = self.brush_anchor else {
                    return;
                };
                let rect = BrushRect::from_corners(anchor, (x, y));
                if phase == BrushPhase::End && rect.is_degenerate() {
                    // A click without a drag clears the brush
                    self.clear_brush();
                    return;
                }
                self.selection = Selection::over(rect, self.layer.points());
            }
        }
        self.breakdown = Breakdown::for_selection(&self.selection, &self.commits);
    }

    pub fn clear_brush(&mut self) {
        self.brush_anchor = None;
        self.selection = Selection::Absent;
        self.breakdown = Breakdown::for_selection(&self.selection, &self.commits);
    }

    fn refresh_selection(&mut self) {
        if let Some(rect) = self.selection.rect() {
            self.selection = Selection::over(rect, self.layer.points());
        }
        self.breakdown = Breakdown::for_selection(&self.selection, &self.commits);
    }

    /// Pointer moved over the plot; `column`/`row` place the tooltip
    pub fn hover(&mut self, x: f64, y: f64, column: u16, row: u16) {
        self.hover = self
            .layer
            .hit_test(x, y)
            .map(|p| Hover { commit_index: p.index, column, row });
    }

    pub fn leave(&mut self) {
        self.hover = None;
    }
}
