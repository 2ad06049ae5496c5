pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use config::FetchConfig;
pub use core::{dispatcher::FetchDispatcher, fetcher::ProxyFetcher};
pub use domain::model::{BatchReport, FetchOutcome, PageReport};
pub use domain::ports::{ConfigProvider, PageFetcher};
pub use utils::error::{FetchError, Result};
