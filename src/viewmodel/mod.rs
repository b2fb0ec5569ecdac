mod scale;
mod scatter;
mod brush;
mod temporal;
mod selection;
mod narrative_viewmodel;
mod files_viewmodel;
mod timeline_viewmodel;
mod app_viewmodel;

pub use scale::{LinearScale, SqrtScale, TimeInterval, TimeScale};
pub use scatter::{AxisTick, Margin, PlotArea, PlotPoint, PointDiff, RADIUS_RANGE, ScatterLayer, ScatterProjection};
pub use brush::{Breakdown, BreakdownScope, BrushPhase, BrushRect, LanguageShare, Selection, language_breakdown};
pub use temporal::{PROGRESS_MAX, PROGRESS_MIN, TemporalFilter};
pub use selection::Selectable;
pub use narrative_viewmodel::{NarrativeStep, NarrativeViewModel};
pub use files_viewmodel::{FileLines, FilesViewModel, LanguagePalette, PALETTE_SIZE};
pub use timeline_viewmodel::{Hover, TimelineViewModel};
pub use app_viewmodel::{Action, AppViewModel, ViewMode};
