pub mod sheet_layout;
pub mod theme;
