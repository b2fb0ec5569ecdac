mod timeline_view;
mod narrative_view;
mod files_view;
mod ui_fmt;

pub use timeline_view::render as render_timeline;
pub use narrative_view::render as render_narrative;
pub use files_view::render as render_files;
