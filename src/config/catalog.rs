//! Catalog browsing settings
//!
//! Page size, detail fetch concurrency and how the total count is requested.

use crate::catalog::pagination::DEFAULT_PAGE_SIZE;
use crate::catalog::CountStrategy;
use serde::Deserialize;

/// Catalog browsing settings
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    /// Identifiers per page
    pub page_size: u64,
    /// Maximum detail requests in flight at once
    pub detail_concurrency: usize,
    /// Request used to obtain the total matching count
    pub count_strategy: CountStrategy,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            detail_concurrency: 8,
            count_strategy: CountStrategy::GetIds,
        }
    }
}

/// Catalog settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileCatalog {
    pub page_size: Option<u64>,
    pub detail_concurrency: Option<usize>,
    pub count_strategy: Option<String>,
}

impl CatalogSettings {
    /// Create from file config with defaults
    ///
    /// Zero sizes and unknown strategies fall back to the defaults.
    pub fn from_file(file: Option<FileCatalog>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            page_size: file
                .page_size
                .filter(|n| *n > 0)
                .unwrap_or(defaults.page_size),
            detail_concurrency: file
                .detail_concurrency
                .filter(|n| *n > 0)
                .unwrap_or(defaults.detail_concurrency),
            count_strategy: file
                .count_strategy
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.count_strategy),
        }
    }
}
