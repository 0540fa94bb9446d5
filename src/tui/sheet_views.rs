use chrono::{NaiveDate, Weekday};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use sheetcal::{
    DateSelectionEngine, PanelHost,
    app::{CALENDAR_SHEET, OPTIONS_SHEET},
    calendar::{DayCell, weekday_labels},
    sheet::OptionSheet,
    ui::{
        sheet_layout::{CELL_WIDTH, SheetLayout, calendar_grid_origin},
        theme::Theme,
    },
};

pub fn render_sheet(
    f: &mut Frame,
    host: &PanelHost,
    id: &str,
    layout: &SheetLayout,
    theme: &Theme,
    hidden: bool,
) {
    if layout.area.height == 0 {
        return;
    }

    let border = if hidden { theme.disabled } else { theme.sheet_border };
    f.render_widget(Clear, layout.area);
    f.render_widget(
        Block::default().borders(Borders::ALL).style(Style::default().fg(border)),
        layout.area,
    );

    let title = match id {
        CALENDAR_SHEET => "Select date",
        OPTIONS_SHEET => "Select time slot",
        _ => "",
    };
    let title_width = layout.header.width.saturating_sub(6);
    let header = vec![
        Line::from(vec![
            Span::styled("[x]", Style::default().fg(theme.error)),
            Span::styled(
                format!("{:^width$}", title, width = usize::from(title_width)),
                Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled("────", Style::default().fg(theme.handle))).alignment(Alignment::Center),
    ];
    f.render_widget(Paragraph::new(header), layout.header);

    match id {
        CALENDAR_SHEET => render_calendar(f, host.calendar(), host.focus(), layout.body, theme),
        OPTIONS_SHEET => render_options(f, host.options(), layout.body, theme),
        _ => {}
    }
}

fn render_calendar(f: &mut Frame, engine: &DateSelectionEngine, focus: NaiveDate, body: Rect, theme: &Theme) {
    let (grid_x, _) = calendar_grid_origin(body);
    let width = (CELL_WIDTH * 7).min(body.width);
    let area = Rect { x: grid_x, y: body.y, width, height: body.height };

    let month_label = engine.visible_month().first_day().format("%B %Y").to_string();
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{:<3}{:^22}{:>3}", "<", month_label, ">"),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(
            weekday_labels(engine.config().first_day_of_week)
                .iter()
                .map(|weekday| {
                    let color = if *weekday == Weekday::Sun { theme.sunday } else { theme.weekday_header };
                    Span::styled(format!("{:>3} ", weekday.to_string()), Style::default().fg(color))
                })
                .collect::<Vec<_>>(),
        ),
    ];

    for week in engine.weeks() {
        let spans: Vec<Span> = week.iter().map(|cell| day_span(cell, focus, theme)).collect();
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn day_span(cell: &DayCell, focus: NaiveDate, theme: &Theme) -> Span<'static> {
    let Some(day) = cell.day else {
        return Span::raw("    ");
    };

    let mut style = Style::default();
    if cell.disabled {
        style = style.fg(theme.disabled);
    } else if cell.weekday() == Weekday::Sun {
        style = style.fg(theme.sunday);
    }
    if cell.is_today {
        style = style.fg(theme.today).add_modifier(Modifier::BOLD);
    }
    if cell.in_range {
        style = style.bg(theme.in_range_bg);
    }
    if cell.selected {
        style = style.bg(theme.selected_bg).fg(theme.selected_fg).add_modifier(Modifier::BOLD);
    }
    if cell.date == focus {
        style = style.add_modifier(Modifier::UNDERLINED).fg(theme.focus);
    }

    Span::styled(format!("{:>3} ", day), style)
}

fn render_options(f: &mut Frame, options: &OptionSheet, body: Rect, theme: &Theme) {
    let lines: Vec<Line> = options
        .rows()
        .enumerate()
        .map(|(index, row)| {
            let marker = if row.selected { "●" } else { "○" };
            let style = if row.disabled {
                Style::default().fg(theme.disabled)
            } else if row.selected {
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut spans = vec![Span::styled(format!(" {} {}. {}", marker, index + 1, row.item.label), style)];
            if let Some(note) = row.note() {
                spans.push(Span::styled(format!("  ({})", note), Style::default().fg(theme.error)));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), body);
}
