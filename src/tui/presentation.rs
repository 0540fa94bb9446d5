use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sheetcal::{
    FormState, PanelHost, SelectionResult,
    ui::sheet_layout::layout_for,
};

use crate::tui::{session::Session, sheet_views};

pub fn ui(f: &mut Frame, host: &PanelHost, session: &Session) {
    let theme = &session.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let title = Paragraph::new("sheetcal - Counseling Request")
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let form = Paragraph::new(form_lines(host.form()))
        .block(Block::default().borders(Borders::ALL).title(" Request "));
    f.render_widget(form, chunks[1]);

    let (status_text, status_color) = match &session.status {
        Some(message) => (message.clone(), theme.error),
        None => (
            "c: calendar | o: time slot | drag header down to dismiss | q: quit".to_string(),
            theme.status_bar,
        ),
    };
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);

    let screen = f.size();
    let open: Vec<String> = host.sheets().open_sheets().map(|id| id.to_string()).collect();
    for id in &open {
        if let Some(layout) = layout_for(host, id, screen, session.pixels_per_row) {
            let hidden = host.topmost() != Some(id.as_str());
            sheet_views::render_sheet(f, host, id, &layout, theme, hidden);
        }
    }
}

fn form_lines(form: &FormState) -> Vec<Line<'static>> {
    let date = match form.date {
        Some(SelectionResult::Single { date }) => date.format("%Y-%m-%d").to_string(),
        Some(SelectionResult::Range { start, end }) => {
            format!("{} ~ {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
        }
        None => "-".to_string(),
    };
    let slot = form
        .option
        .as_ref()
        .map_or_else(|| "-".to_string(), |choice| choice.label.clone());

    vec![
        Line::from(""),
        Line::from(format!("  Date       {}", date)),
        Line::from(format!("  Time slot  {}", slot)),
    ]
}
