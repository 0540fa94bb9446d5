pub mod controller;
pub mod option_list;
pub mod registry;

pub use controller::{CloseReason, Completion, SheetController, SheetId, SheetObserver, SheetPhase, SheetState};
pub use option_list::{OptionChoice, OptionItem, OptionRow, OptionSheet};
pub use registry::SheetRegistry;
