use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::config::{CalendarConfig, SelectionMode};
use crate::calendar::grid::{DayCell, MonthGrid};
use crate::calendar::month::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavUnit {
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SelectionResult {
    Single { date: NaiveDate },
    Range { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("date is not selectable")]
    Unselectable,
    #[error("date is outside the displayed month")]
    OutsideVisibleMonth,
    #[error("end date must be after start date")]
    EndNotAfterStart,
}

impl RejectReason {
    /// Only rejections the user can act on are surfaced to the host.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::EndNotAfterStart)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Complete(SelectionResult),
    Pending { start: NaiveDate },
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Single(Option<NaiveDate>),
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

pub struct DateSelectionEngine {
    config: CalendarConfig,
    visible: YearMonth,
    selection: Selection,
    today: NaiveDate,
    message: Option<String>,
    listener: Option<Box<dyn FnMut(&SelectionResult)>>,
}

impl DateSelectionEngine {
    pub fn new(config: CalendarConfig) -> Self {
        Self::with_today(config, Local::now().date_naive())
    }

    pub fn with_today(config: CalendarConfig, today: NaiveDate) -> Self {
        if !config.has_consistent_bounds() {
            tracing::warn!(min = ?config.min_date, max = ?config.max_date, "calendar bounds are inverted, nothing is selectable");
        }

        let visible = config.clamp_month(YearMonth::of(config.initial_date.unwrap_or(today)));
        let seed = config.initial_date.filter(|date| config.is_selectable(*date));
        let selection = match config.mode {
            SelectionMode::Single => Selection::Single(seed),
            SelectionMode::Range => Selection::Range { start: seed, end: None },
        };

        Self {
            config,
            visible,
            selection,
            today,
            message: None,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Box<dyn FnMut(&SelectionResult)>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn mode(&self) -> SelectionMode {
        self.config.mode
    }

    pub fn visible_month(&self) -> YearMonth {
        self.visible
    }

    pub fn visible_year(&self) -> i32 {
        self.visible.year()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self.selection {
            Selection::Single(date) => date,
            Selection::Range { .. } => None,
        }
    }

    pub fn range_start(&self) -> Option<NaiveDate> {
        match self.selection {
            Selection::Range { start, .. } => start,
            Selection::Single(_) => None,
        }
    }

    pub fn range_end(&self) -> Option<NaiveDate> {
        match self.selection {
            Selection::Range { end, .. } => end,
            Selection::Single(_) => None,
        }
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.config.is_selectable(date)
    }

    /// One-shot validation message for the host to display.
    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    pub fn navigate(&mut self, direction: NavDirection, unit: NavUnit) -> bool {
        let step = match unit {
            NavUnit::Month => 1,
            NavUnit::Year => 12,
        };
        let delta = match direction {
            NavDirection::Prev => -step,
            NavDirection::Next => step,
        };

        let Some(target) = self.visible.add_months(delta) else {
            return false;
        };
        if !self.config.month_in_bounds(target) {
            tracing::debug!(%target, "navigation outside bounds ignored");
            return false;
        }
        tracing::debug!(from = %self.visible, to = %target, "calendar navigated");
        self.visible = target;
        true
    }

    pub fn show_month_of(&mut self, date: NaiveDate) -> bool {
        let target = YearMonth::of(date);
        if !self.config.month_in_bounds(target) {
            return false;
        }
        self.visible = target;
        true
    }

    pub fn go_to_today(&mut self) -> Option<NaiveDate> {
        self.go_to_today_at(Local::now().date_naive())
    }

    /// Shows today's month and seeds the selection with today, or clears it when today is not selectable.
    pub fn go_to_today_at(&mut self, today: NaiveDate) -> Option<NaiveDate> {
        self.today = today;
        self.visible = self.config.clamp_month(YearMonth::of(today));
        let today = Some(today).filter(|date| self.config.is_selectable(*date));

        self.selection = match self.selection {
            Selection::Single(_) => Selection::Single(today),
            Selection::Range { .. } => Selection::Range { start: today, end: None },
        };
        today
    }

    pub fn select_date(&mut self, date: NaiveDate) -> SelectOutcome {
        if !self.config.is_selectable(date) {
            return SelectOutcome::Rejected(RejectReason::Unselectable);
        }
        if !self.visible.contains(date) {
            return SelectOutcome::Rejected(RejectReason::OutsideVisibleMonth);
        }

        let outcome = match self.selection {
            Selection::Single(_) => {
                self.selection = Selection::Single(Some(date));
                SelectOutcome::Complete(SelectionResult::Single { date })
            }
            Selection::Range { start: Some(start), end: None } => {
                if date > start {
                    self.selection = Selection::Range { start: Some(start), end: Some(date) };
                    SelectOutcome::Complete(SelectionResult::Range { start, end: date })
                } else {
                    let reason = RejectReason::EndNotAfterStart;
                    self.message = Some(reason.to_string());
                    return SelectOutcome::Rejected(reason);
                }
            }
            Selection::Range { .. } => {
                self.selection = Selection::Range { start: Some(date), end: None };
                SelectOutcome::Pending { start: date }
            }
        };

        if let SelectOutcome::Complete(result) = &outcome {
            tracing::info!(?result, "date selection complete");
            if let Some(listener) = self.listener.as_mut() {
                listener(result);
            }
        }
        outcome
    }

    pub fn clear_selection(&mut self) {
        self.selection = match self.selection {
            Selection::Single(_) => Selection::Single(None),
            Selection::Range { .. } => Selection::Range { start: None, end: None },
        };
    }

    pub fn month_grid(&self) -> MonthGrid<'_> {
        MonthGrid::new(self)
    }

    pub fn weeks(&self) -> Vec<Vec<DayCell>> {
        let cells: Vec<DayCell> = self.month_grid().collect();
        cells.chunks(7).map(<[DayCell]>::to_vec).collect()
    }

    pub(crate) fn is_highlighted(&self, date: NaiveDate) -> bool {
        match self.selection {
            Selection::Single(selected) => selected == Some(date),
            Selection::Range { start, end } => start == Some(date) || end == Some(date),
        }
    }

    pub(crate) fn is_inside_range(&self, date: NaiveDate) -> bool {
        match self.selection {
            Selection::Range { start: Some(start), end: Some(end) } => start < date && date < end,
            _ => false,
        }
    }
}
