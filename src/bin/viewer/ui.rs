//! UI rendering logic
//!
//! Layout:
//! - Title bar (1 line)
//! - Source pane | generated C# pane (split in half)
//! - Status line (1 line): directive counts and key help

use super::app::{App, PaneState};
use super::model::Focus;
use easysharp::easysharp::parsing::DirectiveKind;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Minimum terminal width required for the UI
const MIN_TERMINAL_WIDTH: u16 = 50;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App, file_name: &str) {
    let size = frame.area();

    if size.width < MIN_TERMINAL_WIDTH {
        let msg = format!(
            "Terminal too narrow: {} < {} chars",
            size.width, MIN_TERMINAL_WIDTH
        );
        let paragraph = Paragraph::new(msg)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        frame.render_widget(paragraph, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    let title = Paragraph::new(format!("easysharp:: {}", file_name)).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let source_lines: Vec<Line> = app
        .model
        .source_lines
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let style = app
                .model
                .kind_at(index + 1)
                .map(kind_style)
                .unwrap_or_default();
            Line::from(vec![
                Span::styled(
                    format!("{:>4} ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(text.clone(), style),
            ])
        })
        .collect();
    render_pane(
        frame,
        panes[0],
        "E#",
        source_lines,
        &mut app.source,
        app.focus == Focus::Source,
    );

    let generated_lines: Vec<Line> = app
        .model
        .generated_lines
        .iter()
        .map(|text| Line::from(text.clone()))
        .collect();
    render_pane(
        frame,
        panes[1],
        "C#",
        generated_lines,
        &mut app.generated,
        app.focus == Focus::Generated,
    );

    render_status_line(frame, chunks[2], app);
}

fn render_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    mut lines: Vec<Line<'static>>,
    state: &mut PaneState,
    focused: bool,
) {
    // Borders take one row at the top and one at the bottom.
    state.scroll_into_view(area.height.saturating_sub(2) as usize);

    if focused {
        if let Some(line) = lines.get_mut(state.cursor) {
            *line = line.clone().patch_style(Style::default().bg(Color::DarkGray));
        }
    }

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string());
    let scroll = u16::try_from(state.scroll).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let counts = app
        .model
        .summary()
        .into_iter()
        .map(|(kind, count)| format!("{kind}: {count}"))
        .collect::<Vec<_>>()
        .join("  ");
    let status = format!("{counts}  |  Tab: switch pane  j/k: move  q: quit");
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn kind_style(kind: DirectiveKind) -> Style {
    match kind {
        DirectiveKind::Import => Style::default().fg(Color::Magenta),
        DirectiveKind::Assert => Style::default().fg(Color::Red),
        DirectiveKind::Print => Style::default().fg(Color::Green),
        DirectiveKind::ForHeader => Style::default().fg(Color::Yellow),
        DirectiveKind::Regular => Style::default(),
    }
}
