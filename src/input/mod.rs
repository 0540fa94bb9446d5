pub mod keys;
pub mod pointer;

pub use keys::{KeyOutcome, handle_key};
pub use pointer::PointerState;
