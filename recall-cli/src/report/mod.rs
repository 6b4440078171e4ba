mod console;
mod files;

pub use console::{curve_table, global_line, trial_table};
pub use files::{WrittenFiles, write_report};
