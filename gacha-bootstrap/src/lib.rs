pub mod context;
pub mod lifecycle;

pub use lifecycle::{print_stats, run_import_once, run_standalone};
