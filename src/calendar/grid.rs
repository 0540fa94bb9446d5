use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::calendar::engine::DateSelectionEngine;
use crate::calendar::month::{YearMonth, column_of};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// Day of month, `None` for padding cells from the adjacent months.
    pub day: Option<u32>,
    pub date: NaiveDate,
    pub selected: bool,
    pub in_range: bool,
    pub disabled: bool,
    pub is_today: bool,
}

impl DayCell {
    pub fn is_padding(&self) -> bool {
        self.day.is_none()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Cells of the visible month, padded to whole weeks. Holds no state of its own.
pub struct MonthGrid<'a> {
    engine: &'a DateSelectionEngine,
    month: YearMonth,
    start: NaiveDate,
    index: u64,
    len: u64,
}

impl<'a> MonthGrid<'a> {
    pub(crate) fn new(engine: &'a DateSelectionEngine) -> Self {
        let month = engine.visible_month();
        let first = month.first_day();
        let leading = column_of(first.weekday(), engine.config().first_day_of_week) as u64;
        let start = first.checked_sub_days(Days::new(leading)).unwrap_or(first);
        let leading = (first - start).num_days() as u64;
        let filled = leading + month.days() as u64;
        let len = filled.div_ceil(7) * 7;

        Self {
            engine,
            month,
            start,
            index: 0,
            len,
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    fn cell(&self, date: NaiveDate) -> DayCell {
        if !self.month.contains(date) {
            return DayCell {
                day: None,
                date,
                selected: false,
                in_range: false,
                disabled: true,
                is_today: false,
            };
        }

        DayCell {
            day: Some(date.day()),
            date,
            selected: self.engine.is_highlighted(date),
            in_range: self.engine.is_inside_range(date),
            disabled: !self.engine.is_selectable(date),
            is_today: date == self.engine.today(),
        }
    }
}

impl Iterator for MonthGrid<'_> {
    type Item = DayCell;

    fn next(&mut self) -> Option<DayCell> {
        while self.index < self.len {
            let offset = self.index;
            self.index += 1;
            if let Some(date) = self.start.checked_add_days(Days::new(offset)) {
                return Some(self.cell(date));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.index) as usize;
        (0, Some(remaining))
    }
}

pub fn weekday_labels(week_start: Weekday) -> [Weekday; 7] {
    let mut labels = [week_start; 7];
    for i in 1..7 {
        labels[i] = labels[i - 1].succ();
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::config::CalendarConfig;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn engine(config: CalendarConfig) -> DateSelectionEngine {
        DateSelectionEngine::with_today(config, date(2025, 3, 14))
    }

    #[test]
    fn march_2025_starting_sunday_has_six_padded_weeks() {
        let engine = engine(CalendarConfig::single());
        let weeks = engine.weeks();

        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|week| week.len() == 7));
        let first_row: Vec<Option<u32>> = weeks[0].iter().map(|cell| cell.day).collect();
        assert_eq!(first_row, vec![None, None, None, None, None, None, Some(1)]);
        assert_eq!(weeks[0][0].date, date(2025, 2, 23));
    }

    #[test]
    fn monday_start_shifts_leading_padding() {
        let engine = engine(CalendarConfig::single().starting_week_on(Weekday::Mon));
        let cells: Vec<DayCell> = engine.month_grid().collect();

        assert_eq!(cells.iter().take_while(|cell| cell.is_padding()).count(), 5);
        assert_eq!(cells.len() % 7, 0);
        assert_eq!(cells.iter().filter(|cell| !cell.is_padding()).count(), 31);
    }

    #[test]
    fn padding_cells_are_disabled() {
        let engine = engine(CalendarConfig::single());
        assert!(engine.month_grid().filter(DayCell::is_padding).all(|cell| cell.disabled && !cell.selected));
    }

    #[test]
    fn grid_is_restartable() {
        let engine = engine(CalendarConfig::single());
        let first: Vec<DayCell> = engine.month_grid().collect();
        let second: Vec<DayCell> = engine.month_grid().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn range_highlights_ends_and_marks_interior() {
        let mut engine = engine(CalendarConfig::range());
        engine.select_date(date(2025, 3, 10));
        engine.select_date(date(2025, 3, 13));

        let marked: Vec<(u32, bool, bool)> = engine
            .month_grid()
            .filter_map(|cell| cell.day.map(|day| (day, cell.selected, cell.in_range)))
            .filter(|(day, _, _)| (9..=14).contains(day))
            .collect();

        assert_eq!(
            marked,
            vec![
                (9, false, false),
                (10, true, false),
                (11, false, true),
                (12, false, true),
                (13, true, false),
                (14, false, false),
            ]
        );
    }

    #[test]
    fn pending_range_start_is_highlighted_alone() {
        let mut engine = engine(CalendarConfig::range());
        engine.select_date(date(2025, 3, 10));

        let selected: Vec<u32> = engine.month_grid().filter(|cell| cell.selected).filter_map(|cell| cell.day).collect();
        assert_eq!(selected, vec![10]);
        assert!(engine.month_grid().all(|cell| !cell.in_range));
    }

    #[test]
    fn disabled_flag_follows_selectability() {
        let engine = engine(CalendarConfig::single().without_weekends().excluding([date(2025, 3, 12)]));
        let disabled: Vec<u32> = engine
            .month_grid()
            .filter(|cell| cell.disabled)
            .filter_map(|cell| cell.day)
            .filter(|day| *day <= 16)
            .collect();
        assert_eq!(disabled, vec![1, 2, 8, 9, 12, 15, 16]);
    }

    #[test]
    fn today_is_flagged() {
        let engine = engine(CalendarConfig::single());
        let today: Vec<NaiveDate> = engine.month_grid().filter(|cell| cell.is_today).map(|cell| cell.date).collect();
        assert_eq!(today, vec![date(2025, 3, 14)]);
    }

    #[test]
    fn labels_wrap_around_the_week() {
        assert_eq!(
            weekday_labels(Weekday::Sat),
            [Weekday::Sat, Weekday::Sun, Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        );
    }
}
