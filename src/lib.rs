pub mod app;
pub mod calendar;
pub mod gesture;
pub mod input;
pub mod sheet;
pub mod storage;
pub mod ui;

pub use app::{FormState, PanelHost};
pub use calendar::{CalendarConfig, DateSelectionEngine, SelectOutcome, SelectionMode, SelectionResult};
pub use gesture::{Decision, GestureSample, GestureTracker};
pub use sheet::{CloseReason, Completion, SheetController, SheetId, SheetPhase};
