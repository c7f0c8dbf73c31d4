// Pure domain services

pub mod catalog;
pub mod merge;
pub mod statistics;

pub use catalog::*;
pub use merge::*;
pub use statistics::*;
