use ratatui::{layout::Rect, style::Color};

/// Ordinal language colors (Tableau 10), indexed by palette slot
pub const TABLEAU10: [Color; 10] = [
    Color::Rgb(0x4e, 0x79, 0xa7),
    Color::Rgb(0xf2, 0x8e, 0x2c),
    Color::Rgb(0xe1, 0x57, 0x59),
    Color::Rgb(0x76, 0xb7, 0xb2),
    Color::Rgb(0x59, 0xa1, 0x4f),
    Color::Rgb(0xed, 0xc9, 0x49),
    Color::Rgb(0xaf, 0x7a, 0xa1),
    Color::Rgb(0xff, 0x9d, 0xa7),
    Color::Rgb(0x9c, 0x75, 0x5f),
    Color::Rgb(0xba, 0xb0, 0xab),
];

pub const POINT_COLOR: Color = Color::Rgb(70, 130, 180);
pub const SELECTED_COLOR: Color = Color::Rgb(255, 107, 107);
pub const ENTERING_COLOR: Color = Color::Rgb(144, 238, 144);

pub fn palette_color(slot: usize) -> Color {
    TABLEAU10[slot % TABLEAU10.len()]
}

/// Create a progress bar string with filled and empty blocks
pub fn bar(percent: f64, width: usize) -> String {
    let p = percent.clamp(0.0, 100.0);
    let filled = ((p / 100.0) * width as f64).round() as usize;
    "█".repeat(filled) + &"░".repeat(width.saturating_sub(filled))
}

/// Place a `width`x`height` popup just below-right of a cell, kept inside `bounds`
pub fn popup_at(column: u16, row: u16, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let max_x = bounds.x + bounds.width - width;
    let max_y = bounds.y + bounds.height - height;
    Rect::new(
        column.saturating_add(2).clamp(bounds.x, max_x),
        row.saturating_add(1).clamp(bounds.y, max_y),
        width,
        height,
    )
}

/// Shorten a string to `max` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        kept + "…"
    }
}
