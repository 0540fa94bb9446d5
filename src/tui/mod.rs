mod presentation;
mod sample_options;
mod session;
mod sheet_views;

pub use session::run_tui;
