pub mod answers;
pub mod args;
pub mod messages;
pub mod runner;
pub mod tasks;

pub use args::{get_args, get_log_level_from_verbose, Args};
pub use runner::run;
