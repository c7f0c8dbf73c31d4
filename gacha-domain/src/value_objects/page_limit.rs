// Page limit value object

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UNLIMITED_PAGES: i64 = -1;

/// Operator-controlled ceiling on pages fetched per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PageLimit {
    Unlimited,
    Pages(u32),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("page_limit must be -1 (unlimited) or a positive integer, got {0}")]
pub struct InvalidPageLimit(pub i64);

impl PageLimit {
    /// True once `pages_fetched` has hit the ceiling.
    pub fn is_reached(&self, pages_fetched: u32) -> bool {
        match self {
            PageLimit::Unlimited => false,
            PageLimit::Pages(max) => pages_fetched >= *max,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, PageLimit::Unlimited)
    }
}

impl TryFrom<i64> for PageLimit {
    type Error = InvalidPageLimit;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == UNLIMITED_PAGES {
            return Ok(PageLimit::Unlimited);
        }
        match u32::try_from(value) {
            Ok(pages) if pages > 0 => Ok(PageLimit::Pages(pages)),
            _ => Err(InvalidPageLimit(value)),
        }
    }
}

impl From<PageLimit> for i64 {
    fn from(limit: PageLimit) -> Self {
        match limit {
            PageLimit::Unlimited => UNLIMITED_PAGES,
            PageLimit::Pages(pages) => i64::from(pages),
        }
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        PageLimit::Pages(50)
    }
}
