use rustc_hash::FxHashSet;
use time::OffsetDateTime;

use crate::config::RootPolicy;
use crate::model::Commit;
use crate::util::format_hour_tick;

use super::scale::{LinearScale, SqrtScale, TimeScale};

/// Radius range for plotted commits, in plot units
pub const RADIUS_RANGE: (f64, f64) = (2.0, 30.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Virtual plot surface; y grows downward from the top edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin { top: 10.0, right: 10.0, bottom: 30.0, left: 20.0 },
        }
    }
}

impl PlotArea {
    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin.right
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }
}

/// One commit projected onto the plot
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub id: String,
    /// Position of the commit in the timeline's commit list
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub total_lines: usize,
}

impl PlotPoint {
    pub fn covers(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (self.x - x, self.y - y);
        dx * dx + dy * dy <= self.r * self.r
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// Scales placing commits by time (x), hour of day (y) and size (radius)
#[derive(Debug, Clone)]
pub struct ScatterProjection {
    area: PlotArea,
    x: TimeScale,
    y: LinearScale,
    r: SqrtScale,
}

impl ScatterProjection {
    pub fn new(commits: &[Commit], area: PlotArea, root_policy: RootPolicy) -> Self {
        let x = Self::time_scale(
            commits
                .iter()
                .filter(|c| root_policy == RootPolicy::Include || !c.is_root())
                .map(|c| c.datetime),
            &area,
        );
        let y = LinearScale::new((0.0, 24.0), (area.bottom(), area.top()));
        let r = SqrtScale::new(line_extent(commits.iter()), RADIUS_RANGE);
        Self { area, x, y, r }
    }

    fn time_scale(instants: impl IntoIterator<Item = OffsetDateTime>, area: &PlotArea) -> TimeScale {
        TimeScale::from_extent(instants, (area.left(), area.right())).nice()
    }

    pub fn area(&self) -> &PlotArea {
        &self.area
    }

    pub fn x_scale(&self) -> &TimeScale {
        &self.x
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn r_scale(&self) -> &SqrtScale {
        &self.r
    }

    pub fn position(&self, commit: &Commit) -> (f64, f64) {
        (self.x.apply(commit.datetime), self.y.apply(commit.hour_frac))
    }

    /// Recompute the size domain over a (possibly filtered) commit set
    pub fn resize_to<'a>(&mut self, commits: impl Iterator<Item = &'a Commit>) {
        self.r = self.r.with_domain(line_extent(commits));
    }

    /// Fit the time axis to a (possibly filtered) commit set; no-op when it is empty
    pub fn fit_x<'a>(&mut self, commits: impl Iterator<Item = &'a Commit>) {
        let instants: Vec<OffsetDateTime> = commits.map(|c| c.datetime).collect();
        if !instants.is_empty() {
            self.x = Self::time_scale(instants, &self.area);
        }
    }

    pub fn set_x_scale(&mut self, x: TimeScale) {
        self.x = x;
    }

    /// Plot points for `commits` (paired with their timeline index), largest first.
    /// The root commit is never plotted.
    pub fn project<'a>(&self, commits: impl Iterator<Item = (usize, &'a Commit)>) -> Vec<PlotPoint> {
        let mut points: Vec<PlotPoint> = commits
            .filter(|(_, c)| !c.is_root())
            .map(|(index, c)| {
                let (x, y) = self.position(c);
                PlotPoint {
                    id: c.id.clone(),
                    index,
                    x,
                    y,
                    r: self.r.apply(c.total_lines() as f64),
                    total_lines: c.total_lines(),
                }
            })
            .collect();

        points.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));
        points
    }

    pub fn x_ticks(&self, count: usize) -> Vec<AxisTick> {
        let interval = self.x.interval(count);
        self.x
            .ticks(count)
            .into_iter()
            .map(|t| AxisTick { position: self.x.apply(t), label: interval.label(t) })
            .collect()
    }

    /// Hour ticks every `step` hours, labelled "HH:00"
    pub fn y_ticks(&self, step: f64) -> Vec<AxisTick> {
        self.y
            .ticks_every(step)
            .into_iter()
            .map(|h| AxisTick { position: self.y.apply(h), label: format_hour_tick(h) })
            .collect()
    }
}

fn line_extent<'a>(commits: impl Iterator<Item = &'a Commit>) -> (f64, f64) {
    let mut extent: Option<(usize, usize)> = None;
    for c in commits {
        extent = Some(match extent {
            None => (c.total_lines(), c.total_lines()),
            Some((lo, hi)) => (lo.min(c.total_lines()), hi.max(c.total_lines())),
        });
    }
    let (lo, hi) = extent.unwrap_or((0, 0));
    (lo as f64, hi as f64)
}

/// Ids that entered, stayed or left on a rebind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointDiff {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    pub exited: Vec<String>,
}

/// The drawn point set, keyed by commit id
#[derive(Debug, Clone, Default)]
pub struct ScatterLayer {
    points: Vec<PlotPoint>,
    entering: FxHashSet<String>,
}

impl ScatterLayer {
    /// Replace the drawn points, reporting which ids entered, updated and exited
    pub fn rebind(&mut self, points: Vec<PlotPoint>) -> PointDiff {
        let previous: FxHashSet<&str> = self.points.iter().map(|p| p.id.as_str()).collect();
        let next: FxHashSet<&str> = points.iter().map(|p| p.id.as_str()).collect();

        let mut diff = PointDiff::default();
        for p in &points {
            if previous.contains(p.id.as_str()) {
                diff.updated.push(p.id.clone());
            } else {
                diff.entered.push(p.id.clone());
            }
        }
        for p in &self.points {
            if !next.contains(p.id.as_str()) {
                diff.exited.push(p.id.clone());
            }
        }

        self.entering = diff.entered.iter().cloned().collect();
        self.points = points;
        diff
    }

    /// Points in draw order (largest first, so smaller ones end up on top)
    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    /// Whether the point appeared on the most recent rebind
    pub fn is_entering(&self, id: &str) -> bool {
        self.entering.contains(id)
    }

    /// Topmost point whose disc covers the given plot position
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&PlotPoint> {
        self.points.iter().rev().find(|p| p.covers(x, y))
    }
}
