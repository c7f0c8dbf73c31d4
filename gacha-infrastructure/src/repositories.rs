pub mod json_store;
pub mod reference_tables;

pub use json_store::*;
pub use reference_tables::*;
