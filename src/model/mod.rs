mod line_edit;
mod commit;
mod stats;
mod export;

pub use line_edit::LineEdit;
pub use commit::{Commit, aggregate_commits, hour_fraction, is_root_id};
pub use stats::{DayPeriod, SummaryStats};
pub use export::Export;
