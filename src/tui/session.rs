use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use sheetcal::{
    FormState, PanelHost, SheetPhase,
    app::{CALENDAR_SHEET, OPTIONS_SHEET},
    input::{KeyOutcome, PointerState, handle_key},
    storage::config::{Config, SheetConfig},
    ui::{sheet_layout::{content_rows, panel_height_px}, theme::Theme},
};

use crate::tui::{presentation::ui, sample_options::counseling_slots};

const IDLE_POLL: Duration = Duration::from_millis(250);
const ANIMATION_POLL: Duration = Duration::from_millis(16);

pub struct Session {
    pub theme: Theme,
    pub pixels_per_row: f32,
    pub status: Option<String>,
    opening_since: Option<Instant>,
    closing_until: Option<Instant>,
}

impl Session {
    pub fn is_closing(&self) -> bool {
        self.closing_until.is_some()
    }
}

pub fn run_tui(config: &Config) -> anyhow::Result<FormState> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut host = PanelHost::new(config, counseling_slots());
    let mut session = Session {
        theme: Theme::get_by_name(&config.ui.theme),
        pixels_per_row: config.sheet.pixels_per_row,
        status: None,
        opening_since: None,
        closing_until: None,
    };

    let res = run_app(&mut terminal, &mut host, &mut session, &config.sheet);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("terminal session failed: {}", err);
    }
    res?;
    Ok(host.form().clone())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    host: &mut PanelHost,
    session: &mut Session,
    sheet: &SheetConfig,
) -> io::Result<()> {
    let started = Instant::now();
    let mut pointer = PointerState::new();

    loop {
        measure_panels(host, session.pixels_per_row);
        advance_transitions(host, session, sheet);

        terminal.draw(|f| ui(f, host, session))?;

        let timeout = if session.opening_since.is_some() || session.is_closing() {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                session.status = None;
                if handle_key(key.code, host) == KeyOutcome::Quit {
                    return Ok(());
                }
            }
            TermEvent::Mouse(mouse) => {
                let screen = terminal.size()?;
                let now_ms = started.elapsed().as_millis() as u64;
                pointer.handle_mouse(mouse, host, screen, session.pixels_per_row, now_ms);
            }
            _ => {}
        }

        if let Some(message) = host.take_message() {
            session.status = Some(message);
        }
        for completion in host.drain_completions() {
            tracing::info!(id = %completion.id, reason = ?completion.reason, "panel closed");
            session.closing_until = Some(Instant::now() + Duration::from_millis(sheet.close_transition_ms));
        }
    }
}

fn measure_panels(host: &mut PanelHost, pixels_per_row: f32) {
    for id in [CALENDAR_SHEET, OPTIONS_SHEET] {
        let height = panel_height_px(content_rows(host, id), pixels_per_row);
        host.set_panel_height(id, height);
    }
}

fn advance_transitions(host: &mut PanelHost, session: &mut Session, sheet: &SheetConfig) {
    let opening = host
        .topmost()
        .and_then(|id| host.sheet_state(id))
        .is_some_and(|state| state.phase == SheetPhase::Opening);

    match (opening, session.opening_since) {
        (true, None) => session.opening_since = Some(Instant::now()),
        (true, Some(since)) if since.elapsed() >= Duration::from_millis(sheet.open_transition_ms) => {
            host.settle_sheets();
            session.opening_since = None;
        }
        (false, Some(_)) => session.opening_since = None,
        _ => {}
    }

    if session.closing_until.is_some_and(|until| Instant::now() >= until) {
        session.closing_until = None;
    }
}
