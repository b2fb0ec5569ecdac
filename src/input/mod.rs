mod keyboard;
mod mouse;

use crate::viewmodel::BrushPhase;
pub use crate::viewmodel::ViewMode;

pub use keyboard::{PROGRESS_JUMP, PROGRESS_STEP, key_matches, map_key_to_intent};
pub use mouse::{cell_to_plot, map_mouse_to_intent};

/// User intents derived from keyboard and mouse input
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    // Navigation
    MoveUp,
    MoveDown,
    MoveFirst,
    MoveLast,

    // Mode switching
    ShowTimeline,
    ShowNarrative,
    ShowFiles,

    // Slider
    ProgressBy(f64),
    ProgressTo(f64),

    // Plot pointer, in plot coordinates
    Brush { phase: BrushPhase, x: f64, y: f64 },
    ClearBrush,
    Hover { x: f64, y: f64, column: u16, row: u16 },
    Leave,

    // Actions
    Quit,
}
