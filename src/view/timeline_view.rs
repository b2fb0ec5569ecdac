use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Rectangle},
        Block, Borders, Clear, Gauge, Paragraph, Wrap,
    },
    Frame,
};

use crate::util::{format_clock, format_full_date, format_full_datetime};
use crate::viewmodel::{Breakdown, BreakdownScope, PlotArea, TimelineViewModel};

use super::ui_fmt;

const Y_GUTTER: u16 = 6;
const SIDE_PANEL: u16 = 34;

/// Draw the timeline screen; returns the rect the scatter canvas occupies
/// so mouse cells can be mapped back into plot coordinates.
pub fn render(frame: &mut Frame, vm: &TimelineViewModel, area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Stats
            Constraint::Length(3),  // Slider
            Constraint::Min(0),     // Plot + breakdown
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    render_stats(frame, vm, chunks[0]);
    render_slider(frame, vm, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL)])
        .split(chunks[2]);

    let title = format!("Commits by time of day ({} shown)", vm.points().len());
    let plot = render_scatter(frame, vm, body[0], title);
    render_breakdown(frame, vm, body[1]);
    render_footer(frame, chunks[3]);
    render_tooltip(frame, vm, area);
    plot
}

fn render_stats(frame: &mut Frame, vm: &TimelineViewModel, area: Rect) {
    let stats = vm.stats();
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("Total LOC ", label), Span::styled(stats.total_lines.to_string(), value),
        Span::raw(" | "),
        Span::styled("Commits ", label), Span::styled(stats.total_commits.to_string(), value),
        Span::raw(" | "),
        Span::styled("Files ", label), Span::styled(stats.files.to_string(), value),
        Span::raw(" | "),
        Span::styled("Most active ", label), Span::styled(stats.busiest_period_label(), value),
        Span::raw(" | "),
        Span::styled("Busiest day ", label), Span::styled(stats.busiest_weekday_label(), value),
        Span::raw(" | "),
        Span::styled("Days worked ", label), Span::styled(stats.days_worked.to_string(), value),
    ]))
    .block(Block::default().borders(Borders::ALL).title("locscope"));
    frame.render_widget(header, area);
}

fn render_slider(frame: &mut Frame, vm: &TimelineViewModel, area: Rect) {
    let label = if vm.commits().is_empty() {
        "no commits".to_string()
    } else {
        format_full_datetime(vm.max_time())
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Show commits until ({} of {})",
            vm.filtered_count(),
            vm.commits().len()
        )))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio((vm.progress() / 100.0).clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

/// Map a plot coordinate onto a cell offset within `len` cells
fn plot_to_cell(position: f64, extent: f64, len: u16) -> u16 {
    if extent <= 0.0 || len == 0 {
        return 0;
    }
    ((position / extent * len as f64).floor() as i64).clamp(0, len as i64 - 1) as u16
}

/// Draw the filtered scatter with its axes inside a titled block; returns the canvas rect
pub(super) fn render_scatter(frame: &mut Frame, vm: &TimelineViewModel, area: Rect, title: String) -> Rect {
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(Y_GUTTER), Constraint::Min(0)])
        .split(inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(cols[1]);
    let canvas_rect = rows[0];
    let plot_area = *vm.area();

    render_y_axis(frame, vm, &plot_area, Rect::new(cols[0].x, canvas_rect.y, cols[0].width, canvas_rect.height));
    render_x_axis(frame, vm, &plot_area, rows[1]);

    let height = plot_area.height;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, plot_area.width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            // Gridlines at each hour tick
            for tick in vm.y_ticks() {
                ctx.draw(&CanvasLine {
                    x1: plot_area.left(),
                    y1: height - tick.position,
                    x2: plot_area.right(),
                    y2: height - tick.position,
                    color: Color::DarkGray,
                });
            }
            ctx.layer();

            let hovered = vm.tooltip().map(|(_, h)| h.commit_index);
            for point in vm.points() {
                let color = if hovered == Some(point.index) {
                    Color::White
                } else if vm.is_selected(point.index) {
                    ui_fmt::SELECTED_COLOR
                } else if vm.is_entering(&point.id) {
                    ui_fmt::ENTERING_COLOR
                } else {
                    ui_fmt::POINT_COLOR
                };
                ctx.draw(&Circle { x: point.x, y: height - point.y, radius: point.r, color });
            }

            if let Some(rect) = vm.selection().rect() {
                ctx.layer();
                ctx.draw(&Rectangle {
                    x: rect.x0,
                    y: height - rect.y1,
                    width: rect.x1 - rect.x0,
                    height: rect.y1 - rect.y0,
                    color: Color::Yellow,
                });
            }
        });
    frame.render_widget(canvas, canvas_rect);
    canvas_rect
}

fn render_y_axis(frame: &mut Frame, vm: &TimelineViewModel, plot_area: &PlotArea, gutter: Rect) {
    for tick in vm.y_ticks() {
        let row = gutter.y + plot_to_cell(tick.position, plot_area.height, gutter.height);
        let label = Paragraph::new(Span::styled(tick.label, Style::default().fg(Color::Gray)));
        frame.render_widget(label, Rect::new(gutter.x, row, gutter.width, 1));
    }
}

fn render_x_axis(frame: &mut Frame, vm: &TimelineViewModel, plot_area: &PlotArea, strip: Rect) {
    let width = strip.width as usize;
    let mut line = vec![' '; width];
    let mut next_free = 0;

    for tick in vm.x_ticks(8) {
        let col = plot_to_cell(tick.position, plot_area.width, strip.width) as usize;
        let start = col.saturating_sub(tick.label.chars().count() / 2);
        if start < next_free || start + tick.label.chars().count() > width {
            continue;
        }
        for (i, c) in tick.label.chars().enumerate() {
            line[start + i] = c;
        }
        next_free = start + tick.label.chars().count() + 1;
    }

    let axis = Paragraph::new(Span::styled(line.into_iter().collect::<String>(), Style::default().fg(Color::Gray)));
    frame.render_widget(axis, strip);
}

fn render_breakdown(frame: &mut Frame, vm: &TimelineViewModel, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(vm.count_message(), Style::default().add_modifier(Modifier::BOLD))),
        Line::raw(""),
    ];

    match vm.breakdown() {
        Breakdown::Hidden => {}
        Breakdown::Shown { scope, total_lines, entries } => {
            let heading = match scope {
                BreakdownScope::Selected => "Selected commits",
                BreakdownScope::All => "All commits",
            };
            lines.push(Line::from(vec![
                Span::styled(heading, Style::default().fg(Color::Gray)),
                Span::raw(format!(" ({} lines)", total_lines)),
            ]));
            for entry in entries {
                let share = if *total_lines > 0 {
                    entry.lines as f64 / *total_lines as f64 * 100.0
                } else {
                    0.0
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<8}", ui_fmt::truncate(&entry.language, 8)), Style::default().fg(Color::Cyan)),
                    Span::raw(format!("{:>6} ", entry.lines)),
                    Span::styled(format!("{:>6}", entry.percent), Style::default().fg(Color::Yellow)),
                ]));
                lines.push(Line::from(Span::styled(
                    ui_fmt::bar(share, SIDE_PANEL as usize - 4),
                    Style::default().fg(Color::Blue),
                )));
            }
        }
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Selection"));
    frame.render_widget(panel, area);
}

fn render_tooltip(frame: &mut Frame, vm: &TimelineViewModel, bounds: Rect) {
    let Some((commit, hover)) = vm.tooltip() else {
        return;
    };

    let key = Style::default().fg(Color::Gray);
    let mut lines = vec![
        Line::from(vec![Span::styled("Commit  ", key), Span::styled(commit.id.clone(), Style::default().fg(Color::Yellow))]),
        Line::from(vec![Span::styled("Date    ", key), Span::raw(format_full_date(commit.datetime))]),
        Line::from(vec![Span::styled("Time    ", key), Span::raw(format_clock(commit.datetime))]),
        Line::from(vec![Span::styled("Author  ", key), Span::raw(commit.author.clone())]),
        Line::from(vec![Span::styled("Lines   ", key), Span::raw(commit.total_lines().to_string())]),
    ];
    if !commit.url.is_empty() {
        lines.insert(1, Line::from(vec![
            Span::styled("Link    ", key),
            Span::styled(commit.url.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)),
        ]));
    }

    let height = lines.len() as u16 + 2;
    let popup = ui_fmt::popup_at(hover.column, hover.row, 56, height, bounds);
    let tooltip = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Yellow)));
    frame.render_widget(Clear, popup);
    frame.render_widget(tooltip, popup);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("drag", Style::default().fg(Color::Yellow)), Span::raw(" brush  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)), Span::raw(" clear  "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)), Span::raw(" slider  "),
        Span::styled("[/]", Style::default().fg(Color::Yellow)), Span::raw(" jump  "),
        Span::styled("n", Style::default().fg(Color::Yellow)), Span::raw(" narrative  "),
        Span::styled("f", Style::default().fg(Color::Yellow)), Span::raw(" files  "),
        Span::styled("q", Style::default().fg(Color::Yellow)), Span::raw(" quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
