pub mod import_handlers;
pub mod ops_handlers;
pub mod query_handlers;

pub use import_handlers::*;
pub use ops_handlers::*;
pub use query_handlers::*;
