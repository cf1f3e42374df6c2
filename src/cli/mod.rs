pub mod args;
pub mod processor;
pub mod runner;

pub use args::{get_args, get_log_level_from_verbose, print_help_and_exit, Args};
pub use processor::{FileProcessor, RenderSummary, WriteOptions};
pub use runner::run;
