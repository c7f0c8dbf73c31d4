// Domain entities

pub mod config;
pub mod history;
pub mod import_status;
pub mod pull_record;
pub mod pull_store;
pub mod reference;
pub mod statistics;

pub use config::*;
pub use history::*;
pub use import_status::*;
pub use pull_record::*;
pub use pull_store::*;
pub use reference::*;
pub use statistics::*;
