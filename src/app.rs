use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::Serialize;

use crate::calendar::{DateSelectionEngine, NavDirection, NavUnit, SelectOutcome, SelectionResult};
use crate::gesture::{Decision, GestureSample};
use crate::sheet::{
    CloseReason, Completion, OptionChoice, OptionSheet, SheetController, SheetId, SheetObserver, SheetPhase,
    SheetRegistry, SheetState,
};
use crate::storage::config::Config;

pub const CALENDAR_SHEET: &str = "calendar";
pub const OPTIONS_SHEET: &str = "options";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    pub date: Option<SelectionResult>,
    pub option: Option<OptionChoice>,
}

#[derive(Clone, Default)]
pub struct CompletionLog(Rc<RefCell<VecDeque<Completion>>>);

impl CompletionLog {
    pub fn drain(&self) -> Vec<Completion> {
        self.0.borrow_mut().drain(..).collect()
    }
}

impl SheetObserver for CompletionLog {
    fn phase_changed(&mut self, state: &SheetState) {
        tracing::trace!(id = ?state.id, phase = ?state.phase, offset = state.vertical_offset, "sheet state");
    }

    fn completed(&mut self, completion: &Completion) {
        self.0.borrow_mut().push_back(completion.clone());
    }
}

pub struct PanelHost {
    sheets: SheetRegistry,
    calendar: DateSelectionEngine,
    options: OptionSheet,
    form: FormState,
    focus: NaiveDate,
    message: Option<String>,
    completions: CompletionLog,
}

impl PanelHost {
    pub fn new(config: &Config, options: OptionSheet) -> Self {
        Self::with_today(config, options, Local::now().date_naive())
    }

    pub fn with_today(config: &Config, options: OptionSheet, today: NaiveDate) -> Self {
        let completions = CompletionLog::default();
        let mut sheets = SheetRegistry::new();
        for id in [CALENDAR_SHEET, OPTIONS_SHEET] {
            let controller = SheetController::new(config.sheet.gesture()).with_observer(Box::new(completions.clone()));
            sheets.register(SheetId::from(id), controller);
        }

        let calendar = DateSelectionEngine::with_today(config.calendar.clone(), today);
        let focus = calendar
            .selected_date()
            .or_else(|| calendar.range_start())
            .filter(|date| calendar.visible_month().contains(*date))
            .unwrap_or_else(|| calendar.visible_month().first_day());

        Self {
            sheets,
            calendar,
            options,
            form: FormState::default(),
            focus,
            message: None,
            completions,
        }
    }

    pub fn sheets(&self) -> &SheetRegistry {
        &self.sheets
    }

    pub fn calendar(&self) -> &DateSelectionEngine {
        &self.calendar
    }

    pub fn options(&self) -> &OptionSheet {
        &self.options
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn focus(&self) -> NaiveDate {
        self.focus
    }

    pub fn sheet_state(&self, id: &str) -> Option<&SheetState> {
        self.sheets.get(&SheetId::from(id)).map(SheetController::state)
    }

    pub fn topmost(&self) -> Option<&str> {
        self.sheets.topmost().map(SheetId::as_str)
    }

    pub fn open_sheet(&mut self, id: &str) -> bool {
        self.sheets.open(&SheetId::from(id))
    }

    pub fn settle_sheets(&mut self) {
        self.sheets.settle_all();
    }

    pub fn set_panel_height(&mut self, id: &str, height: f32) {
        if let Some(sheet) = self.sheets.get_mut(&SheetId::from(id)) {
            sheet.set_panel_height(height);
        }
    }

    /// `None` when the calendar sheet is not the open, topmost sheet.
    pub fn tap_date(&mut self, date: NaiveDate) -> Option<SelectOutcome> {
        if !self.is_interactive(CALENDAR_SHEET) {
            return None;
        }

        let outcome = self.calendar.select_date(date);
        match outcome {
            SelectOutcome::Complete(result) => {
                self.focus = date;
                self.form.date = Some(result);
                self.sheets.close(&SheetId::from(CALENDAR_SHEET), CloseReason::ConfirmClose);
            }
            SelectOutcome::Pending { start } => self.focus = start,
            SelectOutcome::Rejected(_) => {
                if let Some(message) = self.calendar.take_message() {
                    self.message = Some(message);
                }
            }
        }
        Some(outcome)
    }

    pub fn select_focused(&mut self) -> Option<SelectOutcome> {
        self.tap_date(self.focus)
    }

    pub fn tap_option(&mut self, index: usize) -> Option<OptionChoice> {
        if !self.is_interactive(OPTIONS_SHEET) {
            return None;
        }
        let choice = self.options.choose(index)?;
        self.form.option = Some(choice.clone());
        self.sheets.close(&SheetId::from(OPTIONS_SHEET), CloseReason::ConfirmClose);
        Some(choice)
    }

    pub fn pointer_down(&mut self, y: f32, time_ms: u64) -> bool {
        self.sheets.touch_start(GestureSample::at(y, time_ms))
    }

    pub fn pointer_move(&mut self, start: GestureSample, y: f32, time_ms: u64) -> Option<f32> {
        self.sheets.touch_move(start.moved_to(y, time_ms))
    }

    pub fn pointer_up(&mut self, start: GestureSample, y: f32, time_ms: u64) -> Decision {
        self.sheets.touch_end(start.moved_to(y, time_ms))
    }

    pub fn tap_outside(&mut self) -> Option<Completion> {
        self.sheets.close_topmost(CloseReason::ExplicitClose)
    }

    pub fn press_close_button(&mut self) -> Option<Completion> {
        self.sheets.close_topmost(CloseReason::ExplicitClose)
    }

    pub fn navigate_calendar(&mut self, direction: NavDirection, unit: NavUnit) -> bool {
        if !self.calendar.navigate(direction, unit) {
            return false;
        }
        let month = self.calendar.visible_month();
        self.focus = month.day(self.focus.day()).unwrap_or_else(|| month.last_day());
        true
    }

    pub fn calendar_today(&mut self) {
        if let Some(today) = self.calendar.go_to_today() {
            self.focus = today;
        } else {
            self.focus = self.calendar.visible_month().first_day();
        }
    }

    /// Moves the keyboard focus, following it into adjacent months when they are navigable.
    pub fn move_focus(&mut self, days: i64) -> bool {
        let step = Days::new(days.unsigned_abs());
        let target = if days >= 0 {
            self.focus.checked_add_days(step)
        } else {
            self.focus.checked_sub_days(step)
        };
        let Some(target) = target else {
            return false;
        };
        if !self.calendar.visible_month().contains(target) && !self.calendar.show_month_of(target) {
            return false;
        }
        self.focus = target;
        true
    }

    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    pub fn drain_completions(&self) -> Vec<Completion> {
        self.completions.drain()
    }

    fn is_interactive(&self, id: &str) -> bool {
        self.topmost() == Some(id)
            && self
                .sheet_state(id)
                .is_some_and(|state| matches!(state.phase, SheetPhase::Opening | SheetPhase::Open))
    }
}
