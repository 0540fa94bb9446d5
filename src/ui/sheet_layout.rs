use chrono::NaiveDate;
use ratatui::layout::Rect;

use crate::app::{CALENDAR_SHEET, OPTIONS_SHEET, PanelHost};
use crate::calendar::DayCell;

pub const HEADER_ROWS: u16 = 2;
pub const CELL_WIDTH: u16 = 4;
pub const CLOSE_BUTTON_WIDTH: u16 = 3;
const CALENDAR_CHROME_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub area: Rect,
    pub header: Rect,
    pub body: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Outside,
    Header,
    CloseButton,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentHit {
    PrevMonth,
    NextMonth,
    Day(NaiveDate),
    Option(usize),
    Nothing,
}

/// Places a sheet of `content_rows` against the bottom of `screen`, pushed down by the drag offset.
pub fn sheet_layout(screen: Rect, content_rows: u16, offset_px: f32, pixels_per_row: f32) -> SheetLayout {
    let height = (content_rows + HEADER_ROWS + 2).min(screen.height);
    let offset_rows = rows_for(offset_px, pixels_per_row).min(height);
    let top = screen.y + screen.height - height + offset_rows;
    let visible = height - offset_rows;

    let area = Rect { x: screen.x, y: top, width: screen.width, height: visible };
    let inner_x = area.x.saturating_add(1);
    let inner_width = area.width.saturating_sub(2);
    let header = Rect {
        x: inner_x,
        y: area.y.saturating_add(1),
        width: inner_width,
        height: HEADER_ROWS.min(visible.saturating_sub(1)),
    };
    let body_top = header.y + header.height;
    let body = Rect {
        x: inner_x,
        y: body_top,
        width: inner_width,
        height: (area.y + area.height).saturating_sub(body_top + 1),
    };

    SheetLayout { area, header, body }
}

pub fn rows_for(offset_px: f32, pixels_per_row: f32) -> u16 {
    if pixels_per_row <= 0.0 || offset_px <= 0.0 {
        return 0;
    }
    (offset_px / pixels_per_row).round().min(u16::MAX as f32) as u16
}

pub fn panel_height_px(content_rows: u16, pixels_per_row: f32) -> f32 {
    f32::from(content_rows + HEADER_ROWS + 2) * pixels_per_row
}

pub fn content_rows(host: &PanelHost, id: &str) -> u16 {
    match id {
        CALENDAR_SHEET => CALENDAR_CHROME_ROWS + host.calendar().weeks().len() as u16,
        OPTIONS_SHEET => host.options().items().len().max(1) as u16,
        _ => 0,
    }
}

pub fn layout_for(host: &PanelHost, id: &str, screen: Rect, pixels_per_row: f32) -> Option<SheetLayout> {
    let offset = host.sheet_state(id)?.vertical_offset;
    Some(sheet_layout(screen, content_rows(host, id), offset, pixels_per_row))
}

pub fn topmost_layout(host: &PanelHost, screen: Rect, pixels_per_row: f32) -> Option<SheetLayout> {
    layout_for(host, host.topmost()?, screen, pixels_per_row)
}

pub fn hit_test(layout: &SheetLayout, column: u16, row: u16) -> HitTarget {
    if !contains(layout.area, column, row) {
        return HitTarget::Outside;
    }
    if row == layout.header.y && column >= layout.header.x && column < layout.header.x + CLOSE_BUTTON_WIDTH {
        return HitTarget::CloseButton;
    }
    if row < layout.body.y {
        return HitTarget::Header;
    }
    HitTarget::Body
}

pub fn calendar_grid_origin(body: Rect) -> (u16, u16) {
    let grid_width = CELL_WIDTH * 7;
    let x = body.x + body.width.saturating_sub(grid_width) / 2;
    (x, body.y + CALENDAR_CHROME_ROWS)
}

pub fn hit_calendar(body: Rect, weeks: &[Vec<DayCell>], column: u16, row: u16) -> ContentHit {
    let (grid_x, grid_y) = calendar_grid_origin(body);
    if row == body.y {
        if column >= grid_x && column < grid_x + 3 {
            return ContentHit::PrevMonth;
        }
        let grid_end = grid_x + CELL_WIDTH * 7;
        if column < grid_end && column + 3 >= grid_end {
            return ContentHit::NextMonth;
        }
        return ContentHit::Nothing;
    }
    if row < grid_y || column < grid_x {
        return ContentHit::Nothing;
    }

    let week = usize::from(row - grid_y);
    let weekday = usize::from((column - grid_x) / CELL_WIDTH);
    match weeks.get(week).and_then(|days| days.get(weekday)) {
        Some(cell) if !cell.is_padding() => ContentHit::Day(cell.date),
        _ => ContentHit::Nothing,
    }
}

pub fn hit_options(body: Rect, item_count: usize, row: u16) -> ContentHit {
    if row < body.y {
        return ContentHit::Nothing;
    }
    let index = usize::from(row - body.y);
    if index < item_count {
        ContentHit::Option(index)
    } else {
        ContentHit::Nothing
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarConfig, DateSelectionEngine};

    const SCREEN: Rect = Rect { x: 0, y: 0, width: 40, height: 30 };

    #[test]
    fn resting_sheet_sits_on_bottom_edge() {
        let layout = sheet_layout(SCREEN, 8, 0.0, 16.0);
        assert_eq!(layout.area, Rect { x: 0, y: 18, width: 40, height: 12 });
        assert_eq!(layout.header, Rect { x: 1, y: 19, width: 38, height: 2 });
        assert_eq!(layout.body, Rect { x: 1, y: 21, width: 38, height: 8 });
    }

    #[test]
    fn drag_offset_pushes_sheet_down() {
        let layout = sheet_layout(SCREEN, 8, 48.0, 16.0);
        assert_eq!(layout.area.y, 21);
        assert_eq!(layout.area.height, 9);
    }

    #[test]
    fn offset_beyond_height_hides_sheet() {
        let layout = sheet_layout(SCREEN, 8, 10_000.0, 16.0);
        assert_eq!(layout.area.height, 0);
        assert_eq!(hit_test(&layout, 5, 29), HitTarget::Outside);
    }

    #[test]
    fn tall_content_is_limited_to_screen() {
        let layout = sheet_layout(SCREEN, 100, 0.0, 16.0);
        assert_eq!(layout.area.y, 0);
        assert_eq!(layout.area.height, 30);
    }

    #[test]
    fn hit_test_distinguishes_regions() {
        let layout = sheet_layout(SCREEN, 8, 0.0, 16.0);
        assert_eq!(hit_test(&layout, 5, 10), HitTarget::Outside);
        assert_eq!(hit_test(&layout, 1, 19), HitTarget::CloseButton);
        assert_eq!(hit_test(&layout, 10, 19), HitTarget::Header);
        assert_eq!(hit_test(&layout, 10, 18), HitTarget::Header);
        assert_eq!(hit_test(&layout, 10, 25), HitTarget::Body);
    }

    #[test]
    fn panel_height_converts_rows_to_pixels() {
        assert_eq!(panel_height_px(8, 16.0), 192.0);
        assert_eq!(rows_for(50.0, 16.0), 3);
        assert_eq!(rows_for(-20.0, 16.0), 0);
    }

    #[test]
    fn calendar_hit_maps_cells_to_dates() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let engine = DateSelectionEngine::with_today(CalendarConfig::single(), today);
        let weeks = engine.weeks();
        let body = Rect { x: 1, y: 10, width: 28, height: 8 };

        assert_eq!(hit_calendar(body, &weeks, 1, 10), ContentHit::PrevMonth);
        assert_eq!(hit_calendar(body, &weeks, 28, 10), ContentHit::NextMonth);
        assert_eq!(hit_calendar(body, &weeks, 1, 12), ContentHit::Nothing);
        assert_eq!(
            hit_calendar(body, &weeks, 1 + 6 * CELL_WIDTH, 12),
            ContentHit::Day(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        );
        assert_eq!(
            hit_calendar(body, &weeks, 1 + 5 * CELL_WIDTH + 2, 14),
            ContentHit::Day(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
        );
    }

    #[test]
    fn option_hit_maps_rows_to_items() {
        let body = Rect { x: 1, y: 10, width: 20, height: 3 };
        assert_eq!(hit_options(body, 3, 11), ContentHit::Option(1));
        assert_eq!(hit_options(body, 3, 13), ContentHit::Nothing);
        assert_eq!(hit_options(body, 3, 9), ContentHit::Nothing);
    }
}
