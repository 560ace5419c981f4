//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use certwatch_core::types::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 10, max: 100). `limit` is accepted as an alias.
    #[serde(default = "default_per_page", alias = "limit")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationParams {
    /// Converts to a `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        let per_page = self.per_page.clamp(1, MAX_PAGE_SIZE);
        let page = self.page.max(1);

        PageRequest {
            page,
            page_size: per_page,
        }
    }
}
