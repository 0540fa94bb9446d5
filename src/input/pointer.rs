use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{CALENDAR_SHEET, OPTIONS_SHEET, PanelHost};
use crate::calendar::{NavDirection, NavUnit};
use crate::gesture::{Decision, GestureSample};
use crate::ui::sheet_layout::{ContentHit, HitTarget, hit_calendar, hit_options, hit_test, topmost_layout};

/// Turns terminal mouse events into sheet gestures and content taps.
#[derive(Debug, Default)]
pub struct PointerState {
    drag: Option<GestureSample>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        host: &mut PanelHost,
        screen: Rect,
        pixels_per_row: f32,
        now_ms: u64,
    ) {
        let y = f32::from(event.row) * pixels_per_row;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(event, host, screen, pixels_per_row, y, now_ms),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(start) = self.drag {
                    host.pointer_move(start, y, now_ms);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(start) = self.drag.take() {
                    let decision = host.pointer_up(start, y, now_ms);
                    if decision == Decision::None {
                        tracing::debug!("header released without travel");
                    }
                }
            }
            _ => {}
        }
    }

    fn press(
        &mut self,
        event: MouseEvent,
        host: &mut PanelHost,
        screen: Rect,
        pixels_per_row: f32,
        y: f32,
        now_ms: u64,
    ) {
        let Some(layout) = topmost_layout(host, screen, pixels_per_row) else {
            return;
        };

        match hit_test(&layout, event.column, event.row) {
            HitTarget::Outside => {
                host.tap_outside();
            }
            HitTarget::CloseButton => {
                host.press_close_button();
            }
            HitTarget::Header => {
                if host.pointer_down(y, now_ms) {
                    self.drag = Some(GestureSample::at(y, now_ms));
                }
            }
            HitTarget::Body => tap_content(host, layout.body, event.column, event.row),
        }
    }
}

fn tap_content(host: &mut PanelHost, body: Rect, column: u16, row: u16) {
    let hit = match host.topmost() {
        Some(CALENDAR_SHEET) => hit_calendar(body, &host.calendar().weeks(), column, row),
        Some(OPTIONS_SHEET) => hit_options(body, host.options().items().len(), row),
        _ => ContentHit::Nothing,
    };

    match hit {
        ContentHit::PrevMonth => {
            host.navigate_calendar(NavDirection::Prev, NavUnit::Month);
        }
        ContentHit::NextMonth => {
            host.navigate_calendar(NavDirection::Next, NavUnit::Month);
        }
        ContentHit::Day(date) => {
            host.tap_date(date);
        }
        ContentHit::Option(index) => {
            host.tap_option(index);
        }
        ContentHit::Nothing => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarConfig;
    use crate::sheet::{CloseReason, OptionSheet, SheetPhase};
    use crate::storage::config::Config;
    use crate::ui::sheet_layout::{content_rows, panel_height_px};
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;

    const SCREEN: Rect = Rect { x: 0, y: 0, width: 40, height: 30 };
    const PX_PER_ROW: f32 = 16.0;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    fn host_with_open_calendar() -> PanelHost {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let config = Config { calendar: CalendarConfig::single(), ..Config::default() };
        let mut host = PanelHost::with_today(&config, OptionSheet::default(), today);
        let rows = content_rows(&host, CALENDAR_SHEET);
        host.set_panel_height(CALENDAR_SHEET, panel_height_px(rows, PX_PER_ROW));
        host.open_sheet(CALENDAR_SHEET);
        host.settle_sheets();
        host
    }

    #[test]
    fn click_above_sheet_taps_outside() {
        let mut host = host_with_open_calendar();
        let mut pointer = PointerState::new();

        pointer.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 0), &mut host, SCREEN, PX_PER_ROW, 0);

        assert_eq!(host.drain_completions()[0].reason, CloseReason::ExplicitClose);
    }

    #[test]
    fn header_drag_moves_sheet_then_dismisses() {
        let mut host = host_with_open_calendar();
        let mut pointer = PointerState::new();
        let header_row = topmost_layout(&host, SCREEN, PX_PER_ROW).unwrap().header.y + 1;

        pointer.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, header_row), &mut host, SCREEN, PX_PER_ROW, 1_000);
        assert!(pointer.is_dragging());

        pointer.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 10, header_row + 2), &mut host, SCREEN, PX_PER_ROW, 1_200);
        assert_eq!(host.sheet_state(CALENDAR_SHEET).map(|s| s.vertical_offset), Some(32.0));

        pointer.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 10, header_row + 8), &mut host, SCREEN, PX_PER_ROW, 1_600);

        assert!(!pointer.is_dragging());
        assert_eq!(host.sheet_state(CALENDAR_SHEET).map(|s| s.phase), Some(SheetPhase::Closed));
        assert_eq!(host.drain_completions()[0].reason, CloseReason::GestureDismiss);
    }

    #[test]
    fn clicking_a_day_selects_it() {
        let mut host = host_with_open_calendar();
        let mut pointer = PointerState::new();
        let layout = topmost_layout(&host, SCREEN, PX_PER_ROW).unwrap();
        let (grid_x, grid_y) = crate::ui::sheet_layout::calendar_grid_origin(layout.body);

        pointer.handle_mouse(
            mouse(MouseEventKind::Down(MouseButton::Left), grid_x + 5 * 4 + 1, grid_y + 2),
            &mut host,
            SCREEN,
            PX_PER_ROW,
            0,
        );

        assert_eq!(
            host.form().date,
            Some(crate::calendar::SelectionResult::Single { date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap() })
        );
    }
}
