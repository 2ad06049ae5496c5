use crate::domain::model::FetchOutcome;
use async_trait::async_trait;
use std::ops::RangeInclusive;

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn query_param(&self) -> &str;
    fn target_template(&self) -> &str;
    fn pages(&self) -> RangeInclusive<u32>;
    fn workers(&self) -> usize;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// One request per page. Failures come back as outcomes, never as errors.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page: u32) -> FetchOutcome;
}
