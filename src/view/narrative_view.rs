use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::util::{format_clock, format_full_date};
use crate::viewmodel::{NarrativeViewModel, TimelineViewModel};

use super::timeline_view::render_scatter;

const STORY_HEIGHT: u16 = 7;

pub fn render(frame: &mut Frame, narrative: &NarrativeViewModel, timeline: &TimelineViewModel, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(0),     // Steps + plot + story
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::raw("Step "),
        Span::styled(
            format!("{}", (narrative.selected_index() + 1).min(narrative.steps().len())),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!(" of {} | ", narrative.steps().len())),
        Span::raw(format!("{} commits revealed", timeline.filtered_count())),
    ]))
    .block(Block::default().borders(Borders::ALL).title("The story of this repository"));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STORY_HEIGHT)])
        .split(body[1]);

    render_steps(frame, narrative, body[0]);
    let title = format!("Revealed so far ({} shown)", timeline.points().len());
    render_scatter(frame, timeline, right[0], title);
    render_story(frame, narrative, right[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓ scroll", Style::default().fg(Color::Yellow)), Span::raw(" step  "),
        Span::styled("g/G", Style::default().fg(Color::Yellow)), Span::raw(" first/last  "),
        Span::styled("t", Style::default().fg(Color::Yellow)), Span::raw(" timeline  "),
        Span::styled("f", Style::default().fg(Color::Yellow)), Span::raw(" files  "),
        Span::styled("q", Style::default().fg(Color::Yellow)), Span::raw(" quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

fn render_steps(frame: &mut Frame, vm: &NarrativeViewModel, area: Rect) {
    let items: Vec<ListItem> = vm
        .steps()
        .iter()
        .map(|step| {
            ListItem::new(Line::from(vec![
                Span::styled(format_full_date(step.datetime), Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::raw(format_clock(step.datetime)),
                Span::styled(format!("{:>7} lines", step.total_lines), Style::default().fg(Color::Yellow)),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    if !vm.steps().is_empty() {
        list_state.select(Some(vm.selected_index()));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!("Commits ({})", vm.steps().len())))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_story(frame: &mut Frame, vm: &NarrativeViewModel, area: Rect) {
    let lines = match vm.current() {
        Some(step) => {
            let mut lines = vec![Line::raw(step.sentence()), Line::raw("")];
            if !step.url.is_empty() {
                lines.push(Line::from(Span::styled(
                    step.url.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
                )));
            }
            lines
        }
        None => vec![Line::from(Span::styled("No commits to tell about.", Style::default().fg(Color::Gray)))],
    };

    let story = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(story, area);
}
