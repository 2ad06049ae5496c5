#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::ops::RangeInclusive;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/request";
pub const DEFAULT_QUERY_PARAM: &str = "url";
pub const DEFAULT_TARGET_TEMPLATE: &str =
    "https://www.property.com.au/search/?locations=Southport,+QLD+4215&pageNumber={page}";
pub const DEFAULT_FIRST_PAGE: u32 = 1;
pub const DEFAULT_LAST_PAGE: u32 = 54;
pub const DEFAULT_WORKERS: usize = 55;
/// Upper bound on requests in flight for one batch.
pub const MAX_WORKERS: usize = 1024;

/// Placeholder in `target_template` replaced by the page index.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Resolved settings for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub endpoint: String,
    pub query_param: String,
    pub target_template: String,
    pub first_page: u32,
    pub last_page: u32,
    pub workers: usize,
    pub timeout_seconds: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            target_template: DEFAULT_TARGET_TEMPLATE.to_string(),
            first_page: DEFAULT_FIRST_PAGE,
            last_page: DEFAULT_LAST_PAGE,
            workers: DEFAULT_WORKERS,
            timeout_seconds: None,
        }
    }
}

impl FetchConfig {
    pub fn page_count(&self) -> usize {
        self.pages().count()
    }
}

impl ConfigProvider for FetchConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query_param(&self) -> &str {
        &self.query_param
    }

    fn target_template(&self) -> &str {
        &self.target_template
    }

    fn pages(&self) -> RangeInclusive<u32> {
        self.first_page..=self.last_page
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for FetchConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("query_param", &self.query_param)?;
        validation::validate_non_empty_string("target_template", &self.target_template)?;
        validation::validate_contains("target_template", &self.target_template, PAGE_PLACEHOLDER)?;
        validation::validate_ordered_range("pages", self.first_page, self.last_page)?;
        validation::validate_range("workers", self.workers, 1, MAX_WORKERS)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout as usize, 1)?;
        }
        Ok(())
    }
}
