pub mod actions;
pub mod minutes;
pub mod parser;
pub mod patch;
pub mod reflow;
pub mod types;
pub mod window;

pub use minutes::{MinutesArchive, NoMinutes, PriorMinutes};
pub use parser::parse;
pub use types::*;
