// Domain value objects
pub mod banner_category;
pub mod identifiers;
pub mod item_class;
pub mod page_limit;
pub mod server_region;

pub use banner_category::*;
pub use identifiers::*;
pub use item_class::*;
pub use page_limit::*;
pub use server_region::*;
