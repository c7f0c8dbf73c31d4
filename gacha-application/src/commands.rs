pub mod import_commands;
pub mod merge_commands;
