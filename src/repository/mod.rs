mod blame_scanner;
mod database;
mod progress;
mod store;

pub use blame_scanner::{BlameScanner, UNCOMMITTED_AUTHOR, git_time_to_datetime, origin_url};
pub use database::Database;
pub use progress::{IndicatifProgress, NoopProgress, ProgressHandle, ProgressReporter, VerboseProgress};
pub use store::{EditStore, NoStore};

// Re-export the schema version for callers who need it
pub const SCHEMA_VERSION: &str = "1";
