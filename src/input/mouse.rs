use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::viewmodel::{BrushPhase, PlotArea};

use super::{Intent, ViewMode};

/// Convert a terminal cell inside `plot` to plot coordinates (cell centers, y downward)
pub fn cell_to_plot(column: u16, row: u16, plot: Rect, area: &PlotArea) -> Option<(f64, f64)> {
    if plot.width == 0 || plot.height == 0 {
        return None;
    }
    if column < plot.x || row < plot.y || column >= plot.x + plot.width || row >= plot.y + plot.height {
        return None;
    }
    let fx = (column - plot.x) as f64 + 0.5;
    let fy = (row - plot.y) as f64 + 0.5;
    Some((fx * area.width / plot.width as f64, fy * area.height / plot.height as f64))
}

/// Map a mouse event to an intent; `plot` is where the scatter plot was last drawn
pub fn map_mouse_to_intent(event: &MouseEvent, mode: ViewMode, plot: Rect, area: &PlotArea) -> Option<Intent> {
    match mode {
        ViewMode::Narrative | ViewMode::Files => match event.kind {
            MouseEventKind::ScrollDown => Some(Intent::MoveDown),
            MouseEventKind::ScrollUp => Some(Intent::MoveUp),
            _ => None,
        },
        ViewMode::Timeline => {
            let position = cell_to_plot(event.column, event.row, plot, area);
            let brush = |phase| position.map(|(x, y)| Intent::Brush { phase, x, y });
            match event.kind {
                MouseEventKind::Down(MouseButton::Left) => brush(BrushPhase::Start),
                MouseEventKind::Drag(MouseButton::Left) => brush(BrushPhase::Move),
                MouseEventKind::Up(MouseButton::Left) => {
                    // Releasing outside the plot still ends the gesture at the nearest edge
                    let (x, y) = position.unwrap_or_else(|| clamp_to_plot(event.column, event.row, plot, area));
                    Some(Intent::Brush { phase: BrushPhase::End, x, y })
                }
                MouseEventKind::Moved => Some(match position {
                    Some((x, y)) => Intent::Hover { x, y, column: event.column, row: event.row },
                    None => Intent::Leave,
                }),
                MouseEventKind::ScrollUp => Some(Intent::ProgressBy(super::keyboard::PROGRESS_STEP)),
                MouseEventKind::ScrollDown => Some(Intent::ProgressBy(-super::keyboard::PROGRESS_STEP)),
                _ => None,
            }
        }
    }
}

fn clamp_to_plot(column: u16, row: u16, plot: Rect, area: &PlotArea) -> (f64, f64) {
    let last_column = plot.x + plot.width.saturating_sub(1);
    let last_row = plot.y + plot.height.saturating_sub(1);
    cell_to_plot(column.clamp(plot.x, last_column), row.clamp(plot.y, last_row), plot, area)
        .unwrap_or((0.0, 0.0))
}
