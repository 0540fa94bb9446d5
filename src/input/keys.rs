use crossterm::event::KeyCode;

use crate::app::{CALENDAR_SHEET, OPTIONS_SHEET, PanelHost};
use crate::calendar::{NavDirection, NavUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub fn handle_key(key: KeyCode, host: &mut PanelHost) -> KeyOutcome {
    match host.topmost() {
        Some(CALENDAR_SHEET) => handle_calendar_key(key, host),
        Some(OPTIONS_SHEET) => handle_options_key(key, host),
        _ => handle_page_key(key, host),
    }
}

fn handle_page_key(key: KeyCode, host: &mut PanelHost) -> KeyOutcome {
    match key {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char('c') => {
            host.open_sheet(CALENDAR_SHEET);
        }
        KeyCode::Char('o') => {
            host.open_sheet(OPTIONS_SHEET);
        }
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_calendar_key(key: KeyCode, host: &mut PanelHost) -> KeyOutcome {
    match key {
        KeyCode::Char('h') | KeyCode::Left => {
            host.move_focus(-1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            host.move_focus(1);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            host.move_focus(7);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            host.move_focus(-7);
        }
        KeyCode::Char('{') => {
            host.navigate_calendar(NavDirection::Prev, NavUnit::Month);
        }
        KeyCode::Char('}') => {
            host.navigate_calendar(NavDirection::Next, NavUnit::Month);
        }
        KeyCode::Char('[') => {
            host.navigate_calendar(NavDirection::Prev, NavUnit::Year);
        }
        KeyCode::Char(']') => {
            host.navigate_calendar(NavDirection::Next, NavUnit::Year);
        }
        KeyCode::Char('t') => host.calendar_today(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            host.select_focused();
        }
        KeyCode::Char('o') => {
            host.open_sheet(OPTIONS_SHEET);
        }
        KeyCode::Esc => {
            host.press_close_button();
        }
        KeyCode::Char('q') => return KeyOutcome::Quit,
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_options_key(key: KeyCode, host: &mut PanelHost) -> KeyOutcome {
    match key {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let index = c.to_digit(10).map_or(0, |d| d as usize);
            if index > 0 {
                host.tap_option(index - 1);
            }
        }
        KeyCode::Esc => {
            host.press_close_button();
        }
        KeyCode::Char('q') => return KeyOutcome::Quit,
        _ => {}
    }
    KeyOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarConfig, SelectionResult};
    use crate::sheet::{OptionItem, OptionSheet, SheetPhase};
    use crate::storage::config::Config;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn setup_host() -> PanelHost {
        let config = Config {
            calendar: CalendarConfig::single().with_initial_date(date(2025, 3, 10)),
            ..Config::default()
        };
        let options = OptionSheet::new(vec![OptionItem::new("a", "Alpha"), OptionItem::new("b", "Beta")]);
        PanelHost::with_today(&config, options, date(2025, 3, 10))
    }

    #[test]
    fn c_key_opens_calendar() {
        let mut host = setup_host();
        handle_key(KeyCode::Char('c'), &mut host);
        assert_eq!(host.topmost(), Some(CALENDAR_SHEET));
    }

    #[test]
    fn l_key_moves_focus_right() {
        let mut host = setup_host();
        handle_key(KeyCode::Char('c'), &mut host);

        handle_key(KeyCode::Char('l'), &mut host);

        assert_eq!(host.focus(), date(2025, 3, 11));
    }

    #[test]
    fn enter_selects_focused_date_and_closes() {
        let mut host = setup_host();
        handle_key(KeyCode::Char('c'), &mut host);
        host.settle_sheets();
        handle_key(KeyCode::Char('j'), &mut host);

        handle_key(KeyCode::Enter, &mut host);

        assert_eq!(host.form().date, Some(SelectionResult::Single { date: date(2025, 3, 17) }));
        assert_eq!(host.topmost(), None);
    }

    #[test]
    fn esc_closes_topmost_sheet() {
        let mut host = setup_host();
        handle_key(KeyCode::Char('c'), &mut host);

        handle_key(KeyCode::Esc, &mut host);

        assert_eq!(host.sheet_state(CALENDAR_SHEET).map(|s| s.phase), Some(SheetPhase::Closed));
    }

    #[test]
    fn digit_key_chooses_option() {
        let mut host = setup_host();
        handle_key(KeyCode::Char('o'), &mut host);

        handle_key(KeyCode::Char('2'), &mut host);

        assert_eq!(host.form().option.as_ref().map(|c| c.label.as_str()), Some("Beta"));
    }

    #[test]
    fn q_quits_from_page() {
        let mut host = setup_host();
        assert_eq!(handle_key(KeyCode::Char('q'), &mut host), KeyOutcome::Quit);
    }
}
