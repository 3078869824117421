//! Paged list envelope used by the shift listing.

use serde::{Deserialize, Serialize};

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Whether pages after this one still hold elements.
    pub fn has_next(&self) -> bool {
        (u64::from(self.page) + 1) * u64::from(self.size) < self.total_elements
    }
}

/// Paging query parameters (`?page=&size=`).
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page_size() -> u32 {
    20
}
