//! UI rendering for the shortcut inspector.

use crate::app::App;
use crate::panel::ControlKind;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Row, Table},
    Frame,
};

/// Draw the application.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status
        ])
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_status(f, app, chunks[2]);

    if app.show_help() {
        draw_help_popup(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("press shortcuts to drive the panel, ? for the full list")
        .block(Block::default().borders(Borders::ALL).title(" Shortcut Inspector "))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_controls(f, app, halves[0]);
    draw_activity(f, app, halves[1]);
}

fn draw_controls(f: &mut Frame, app: &App, area: Rect) {
    let panel = app.panel.borrow();

    let items: Vec<ListItem> = panel
        .controls
        .iter()
        .map(|control| {
            let marker = match &control.kind {
                ControlKind::Button => "[ > ]".to_string(),
                ControlKind::Toggle { on } => {
                    if *on { "[x]  ".to_string() } else { "[ ]  ".to_string() }
                }
                ControlKind::Radio { selected, .. } => {
                    if *selected { "(*)  ".to_string() } else { "( )  ".to_string() }
                }
                ControlKind::Input { text } => format!("[{text}_]"),
            };

            let focused = panel.focused.as_deref() == Some(control.id.as_str());
            let style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::raw(" "),
                Span::styled(control.label.clone(), style),
            ]))
        })
        .collect();

    let list =
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Controls "));
    f.render_widget(list, area);
}

fn draw_activity(f: &mut Frame, app: &App, area: Rect) {
    let panel = app.panel.borrow();
    let visible = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = panel
        .activity
        .iter()
        .rev()
        .take(visible)
        .map(|entry| ListItem::new(entry.clone()))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Activity (newest first) "),
    );
    f.render_widget(list, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.is_typing() {
        (
            "typing - shortcuts suspended, Escape to leave the field",
            Style::default().fg(Color::Yellow),
        )
    } else {
        (
            "? help | q quit | Ctrl+L search | Alt+N/A/D/F status",
            Style::default().fg(Color::DarkGray),
        )
    };

    let status = Paragraph::new(Span::styled(text, style))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(status, area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let rows: Vec<Row> = app
        .registry
        .help_entries()
        .into_iter()
        .map(|entry| Row::new(vec![entry.keys, entry.description]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(10)])
        .header(
            Row::new(vec!["Key", "Description"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" Shortcuts "));
    f.render_widget(table, area);
}

/// Centered rect helper for popups.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
