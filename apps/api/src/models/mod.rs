pub mod attempt;
pub mod content;
