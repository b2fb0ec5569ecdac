mod format;
mod path;

pub use format::{format_clock, format_full_date, format_full_datetime, format_hour_tick, format_percent};
pub use path::{indent_depth, language_tag};
