pub mod config;
pub mod engine;
pub mod grid;
pub mod month;

pub use config::{CalendarConfig, SelectionMode};
pub use engine::{DateSelectionEngine, NavDirection, NavUnit, RejectReason, SelectOutcome, SelectionResult};
pub use grid::{DayCell, MonthGrid, weekday_labels};
pub use month::{YearMonth, is_weekend};
