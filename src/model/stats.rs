use rustc_hash::FxHashSet;
use serde::Serialize;
use time::{Date, Weekday};

use super::{Commit, LineEdit};

/// Coarse time-of-day bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayPeriod {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [DayPeriod::Night, DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Evening];

    pub fn from_hour(hour: u8) -> Self {
        match hour {
            0..=5 => DayPeriod::Night,
            6..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayPeriod::Night => "Night",
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Weekdays in the order used for tie-breaking
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

/// Corpus-wide metrics computed once per load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_lines: usize,
    pub total_commits: usize,
    pub files: usize,
    pub busiest_period: Option<DayPeriod>,
    pub busiest_weekday: Option<Weekday>,
    pub days_worked: usize,
}

impl SummaryStats {
    pub fn compute(edits: &[LineEdit], commits: &[Commit]) -> Self {
        let mut files: FxHashSet<&str> = FxHashSet::default();
        let mut days: FxHashSet<Date> = FxHashSet::default();
        let mut periods = [0usize; 4];
        let mut weekdays = [0usize; 7];

        for edit in edits {
            files.insert(edit.file.as_str());
            days.insert(edit.datetime.date());
            periods[DayPeriod::from_hour(edit.datetime.hour()).index()] += 1;
            weekdays[edit.datetime.weekday().number_days_from_sunday() as usize] += 1;
        }

        Self {
            total_lines: edits.len(),
            total_commits: commits.len(),
            files: files.len(),
            busiest_period: first_max(&periods).map(|i| DayPeriod::ALL[i]),
            busiest_weekday: first_max(&weekdays).map(|i| WEEKDAYS[i]),
            days_worked: days.len(),
        }
    }

    pub fn busiest_period_label(&self) -> &'static str {
        self.busiest_period.map(DayPeriod::label).unwrap_or("N/A")
    }

    pub fn busiest_weekday_label(&self) -> String {
        self.busiest_weekday
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Index of the first non-zero maximum
fn first_max(counts: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        match best {
            Some(b) if counts[b] >= count => {}
            _ => best = Some(i),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::aggregate_commits;
    use time::OffsetDateTime;
    use time::macros::datetime;

    fn edit(commit: &str, file: &str, at: OffsetDateTime) -> LineEdit {
        LineEdit::new(commit, file, 1, "js", "alice", at)
    }

    #[test]
    fn test_period_boundaries() {
        assert_eq!(DayPeriod::from_hour(0), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(5), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(6), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(12), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(17), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(18), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(23), DayPeriod::Evening);
    }

    #[test]
    fn test_counts() {
        // 2024-03-04 is a Monday
        let edits = vec![
            edit("a", "index.html", datetime!(2024-03-04 9:00 UTC)),
            edit("a", "style.css", datetime!(2024-03-04 9:00 UTC)),
            edit("b", "index.html", datetime!(2024-03-05 20:00 UTC)),
        ];
        let commits = aggregate_commits(&edits, "");
        let stats = SummaryStats::compute(&edits, &commits);

        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.total_commits, 2);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.days_worked, 2);
        assert_eq!(stats.busiest_period, Some(DayPeriod::Morning));
        assert_eq!(stats.busiest_weekday, Some(Weekday::Monday));
    }

    #[test]
    fn test_period_tie_prefers_earlier_bucket() {
        let edits = vec![
            edit("a", "x.js", datetime!(2024-03-04 20:00 UTC)),
            edit("b", "x.js", datetime!(2024-03-04 13:00 UTC)),
        ];
        let stats = SummaryStats::compute(&edits, &aggregate_commits(&edits, ""));
        assert_eq!(stats.busiest_period, Some(DayPeriod::Afternoon));
    }

    #[test]
    fn test_weekday_tie_prefers_sunday_first_order() {
        // Saturday then Sunday, one edit each
        let edits = vec![
            edit("a", "x.js", datetime!(2024-03-09 10:00 UTC)),
            edit("b", "x.js", datetime!(2024-03-10 10:00 UTC)),
        ];
        let stats = SummaryStats::compute(&edits, &aggregate_commits(&edits, ""));
        assert_eq!(stats.busiest_weekday, Some(Weekday::Sunday));
        assert_eq!(stats.busiest_weekday_label(), "Sunday");
    }

    #[test]
    fn test_local_offset_decides_day_and_period() {
        // 01:00 UTC on a Tuesday is still Monday evening at -05:00
        let edits = vec![edit("a", "x.js", datetime!(2024-03-04 20:00 -05:00))];
        let stats = SummaryStats::compute(&edits, &aggregate_commits(&edits, ""));
        assert_eq!(stats.busiest_period, Some(DayPeriod::Evening));
        assert_eq!(stats.busiest_weekday, Some(Weekday::Monday));
    }

    #[test]
    fn test_empty_corpus() {
        let stats = SummaryStats::compute(&[], &[]);
        assert_eq!(stats.total_lines, 0);
        assert_eq!(stats.busiest_period_label(), "N/A");
        assert_eq!(stats.busiest_weekday_label(), "N/A");
        assert_eq!(stats.days_worked, 0);
    }
}
