use rustc_hash::FxHashMap;

use crate::model::{Commit, LineEdit};
use crate::util::format_percent;

use super::scatter::PlotPoint;

/// Axis-aligned rectangle in plot coordinates, corners normalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    /// Build from two opposite corners given in any order
    pub fn from_corners((ax, ay): (f64, f64), (bx, by): (f64, f64)) -> Self {
        Self {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }

    /// Inclusive on every edge
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    pub fn is_degenerate(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }
}

/// Stage of a brush drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushPhase {
    Start,
    Move,
    End,
}

/// The current brush selection
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// No brush drawn
    #[default]
    Absent,
    /// A brush is drawn; `commits` are timeline indices inside it, possibly none
    Present { rect: BrushRect, commits: Vec<usize> },
}

impl Selection {
    /// Evaluate `rect` against the drawn points
    pub fn over(rect: BrushRect, points: &[PlotPoint]) -> Self {
        let commits = points
            .iter()
            .filter(|p| rect.contains(p.x, p.y))
            .map(|p| p.index)
            .collect();
        Selection::Present { rect, commits }
    }

    pub fn rect(&self) -> Option<BrushRect> {
        match self {
            Selection::Absent => None,
            Selection::Present { rect, .. } => Some(*rect),
        }
    }

    pub fn commits(&self) -> &[usize] {
        match self {
            Selection::Absent => &[],
            Selection::Present { commits, .. } => commits,
        }
    }

    pub fn count(&self) -> usize {
        self.commits().len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.commits().contains(&index)
    }

    /// "N commits selected", or "No commits selected" for zero or no brush
    pub fn count_message(&self) -> String {
        match self.count() {
            0 => "No commits selected".to_string(),
            n => format!("{} commits selected", n),
        }
    }
}

/// Lines of one language within a breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub language: String,
    pub lines: usize,
    /// Share of the breakdown's lines, e.g. "33.3%"
    pub percent: String,
}

/// Which commits a shown breakdown was computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownScope {
    Selected,
    All,
}

/// Per-language panel state
#[derive(Debug, Clone, PartialEq)]
pub enum Breakdown {
    /// A brush is drawn but contains no commits
    Hidden,
    Shown {
        scope: BreakdownScope,
        total_lines: usize,
        entries: Vec<LanguageShare>,
    },
}

impl Breakdown {
    /// Absent selection shows every commit; a brush with no commits hides the panel
    pub fn for_selection(selection: &Selection, commits: &[Commit]) -> Self {
        match selection {
            Selection::Absent => Self::over(BreakdownScope::All, commits.iter().flat_map(|c| c.lines())),
            Selection::Present { commits: selected, .. } if selected.is_empty() => Breakdown::Hidden,
            Selection::Present { commits: selected, .. } => Self::over(
                BreakdownScope::Selected,
                selected.iter().filter_map(|&i| commits.get(i)).flat_map(|c| c.lines()),
            ),
        }
    }

    fn over<'a>(scope: BreakdownScope, lines: impl Iterator<Item = &'a LineEdit>) -> Self {
        let (total_lines, entries) = language_breakdown(lines);
        Breakdown::Shown { scope, total_lines, entries }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Breakdown::Hidden)
    }

    pub fn entries(&self) -> &[LanguageShare] {
        match self {
            Breakdown::Hidden => &[],
            Breakdown::Shown { entries, .. } => entries,
        }
    }
}

/// Count lines per language in first-seen order, with each share of the total
pub fn language_breakdown<'a>(lines: impl Iterator<Item = &'a LineEdit>) -> (usize, Vec<LanguageShare>) {
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for line in lines {
        let slot = *slots.entry(line.kind.as_str()).or_insert_with(|| {
            counts.push((line.kind.as_str(), 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let entries = counts
        .into_iter()
        .map(|(language, lines)| LanguageShare {
            language: language.to_string(),
            lines,
            percent: format_percent(lines as f64 / total as f64),
        })
        .collect();
    (total, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::aggregate_commits;
    use time::macros::datetime;

    fn point(index: usize, x: f64, y: f64) -> PlotPoint {
        PlotPoint { id: format!("c{}", index), index, x, y, r: 2.0, total_lines: 1 }
    }

    fn points() -> Vec<PlotPoint> {
        vec![point(0, 100.0, 100.0), point(1, 200.0, 300.0), point(2, 400.0, 50.0)]
    }

    #[test]
    fn test_corners_normalized() {
        let a = BrushRect::from_corners((300.0, 20.0), (10.0, 400.0));
        let b = BrushRect::from_corners((10.0, 400.0), (300.0, 20.0));
        assert_eq!(a, b);
        assert_eq!((a.x0, a.y0, a.x1, a.y1), (10.0, 20.0, 300.0, 400.0));
    }

    #[test]
    fn test_membership_is_inclusive() {
        let rect = BrushRect::from_corners((100.0, 100.0), (200.0, 300.0));
        let selection = Selection::over(rect, &points());
        assert_eq!(selection.commits(), &[0, 1]);
    }

    #[test]
    fn test_widening_never_drops_commits() {
        let narrow = Selection::over(BrushRect::from_corners((90.0, 90.0), (210.0, 310.0)), &points());
        let wide = Selection::over(BrushRect::from_corners((0.0, 0.0), (500.0, 500.0)), &points());
        for index in narrow.commits() {
            assert!(wide.contains(*index));
        }
        assert_eq!(wide.count(), 3);
    }

    #[test]
    fn test_count_messages() {
        assert_eq!(Selection::Absent.count_message(), "No commits selected");

        let empty = Selection::over(BrushRect::from_corners((600.0, 600.0), (700.0, 700.0)), &points());
        assert_eq!(empty.count_message(), "No commits selected");

        let two = Selection::over(BrushRect::from_corners((0.0, 0.0), (250.0, 350.0)), &points());
        assert_eq!(two.count_message(), "2 commits selected");
    }

    fn commits() -> Vec<Commit> {
        let at = datetime!(2024-03-04 10:00 UTC);
        let edits = vec![
            LineEdit::new("a", "index.html", 1, "html", "alice", at),
            LineEdit::new("a", "style.css", 1, "css", "alice", at),
            LineEdit::new("b", "style.css", 2, "css", "alice", at),
            LineEdit::new("b", "main.js", 1, "js", "alice", at),
        ];
        aggregate_commits(&edits, "")
    }

    #[test]
    fn test_absent_selection_shows_everything() {
        let breakdown = Breakdown::for_selection(&Selection::Absent, &commits());
        match breakdown {
            Breakdown::Shown { scope, total_lines, entries } => {
                assert_eq!(scope, BreakdownScope::All);
                assert_eq!(total_lines, 4);
                let languages: Vec<_> = entries.iter().map(|e| e.language.as_str()).collect();
                assert_eq!(languages, ["html", "css", "js"]);
                assert_eq!(entries[1].lines, 2);
                assert_eq!(entries[1].percent, "50%");
            }
            Breakdown::Hidden => panic!("absent selection must show the full breakdown"),
        }
    }

    #[test]
    fn test_empty_brush_hides_panel() {
        let selection = Selection::Present {
            rect: BrushRect::from_corners((0.0, 0.0), (1.0, 1.0)),
            commits: vec![],
        };
        let breakdown = Breakdown::for_selection(&selection, &commits());
        assert!(breakdown.is_hidden());
        assert!(breakdown.entries().is_empty());
        assert_eq!(selection.count_message(), Selection::Absent.count_message());
    }

    #[test]
    fn test_selected_commits_only() {
        let selection = Selection::Present {
            rect: BrushRect::from_corners((0.0, 0.0), (1.0, 1.0)),
            commits: vec![1],
        };
        match Breakdown::for_selection(&selection, &commits()) {
            Breakdown::Shown { scope, total_lines, entries } => {
                assert_eq!(scope, BreakdownScope::Selected);
                assert_eq!(total_lines, 2);
                assert_eq!(entries.len(), 2);
                assert!(entries.iter().all(|e| e.percent == "50%"));
            }
            Breakdown::Hidden => panic!("non-empty selection must show a breakdown"),
        }
    }

    #[test]
    fn test_percent_one_decimal() {
        let at = datetime!(2024-03-04 10:00 UTC);
        let lines = vec![
            LineEdit::new("a", "a.js", 1, "js", "x", at),
            LineEdit::new("a", "a.js", 2, "js", "x", at),
            LineEdit::new("a", "a.css", 1, "css", "x", at),
        ];
        let (total, entries) = language_breakdown(lines.iter());
        assert_eq!(total, 3);
        assert_eq!(entries[0].percent, "66.7%");
        assert_eq!(entries[1].percent, "33.3%");
    }
}
