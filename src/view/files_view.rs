use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::viewmodel::FilesViewModel;

use super::ui_fmt;

const PATH_WIDTH: usize = 32;

pub fn render(frame: &mut Frame, vm: &FilesViewModel, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Legend
            Constraint::Min(0),     // Files
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    render_legend(frame, vm, chunks[0]);
    render_files(frame, vm, chunks[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)), Span::raw(" nav  "),
        Span::styled("t", Style::default().fg(Color::Yellow)), Span::raw(" timeline  "),
        Span::styled("n", Style::default().fg(Color::Yellow)), Span::raw(" narrative  "),
        Span::styled("q", Style::default().fg(Color::Yellow)), Span::raw(" quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

fn render_legend(frame: &mut Frame, vm: &FilesViewModel, area: Rect) {
    let mut spans = Vec::new();
    for (language, slot) in vm.legend() {
        spans.push(Span::styled("■ ", Style::default().fg(ui_fmt::palette_color(slot))));
        spans.push(Span::raw(format!("{}  ", language)));
    }

    let legend = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(format!("Lines by language ({} lines)", vm.total_lines())));
    frame.render_widget(legend, area);
}

fn render_files(frame: &mut Frame, vm: &FilesViewModel, area: Rect) {
    // Room left for the per-line blocks after border, highlight symbol, path and count
    let dots_width = (area.width as usize).saturating_sub(PATH_WIDTH + 20);

    let items: Vec<ListItem> = vm
        .files()
        .iter()
        .map(|file| {
            let mut spans = vec![
                Span::raw(format!("{:<width$}", ui_fmt::truncate(&file.path, PATH_WIDTH), width = PATH_WIDTH)),
                Span::styled(format!("{:>7} ", file.line_count()), Style::default().fg(Color::Cyan)),
            ];
            spans.extend(
                file.line_slots
                    .iter()
                    .take(dots_width)
                    .map(|&slot| Span::styled("▪", Style::default().fg(ui_fmt::palette_color(slot)))),
            );
            if file.line_count() > dots_width {
                spans.push(Span::styled("…", Style::default().fg(Color::Gray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    if !vm.files().is_empty() {
        list_state.select(Some(vm.selected_index()));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!("Files ({})", vm.files().len())))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
