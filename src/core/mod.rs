pub mod dispatcher;
pub mod fetcher;

pub use crate::domain::model::{BatchReport, FetchOutcome, PageReport};
pub use crate::domain::ports::{ConfigProvider, PageFetcher};
pub use crate::utils::error::Result;
