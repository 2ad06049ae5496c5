use crate::config::PAGE_PLACEHOLDER;
use crate::core::{ConfigProvider, FetchOutcome, PageFetcher};
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use std::error::Error as _;
use std::time::Duration;
use url::Url;

/// Sends one GET per page to the fetch proxy, passing the listing URL as a
/// query parameter.
pub struct ProxyFetcher {
    client: Client,
    endpoint: Url,
    query_param: String,
    target_template: String,
}

impl ProxyFetcher {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        Self::with_client(builder.build()?, config)
    }

    /// Reuses an existing client and its connection pool.
    pub fn with_client<C: ConfigProvider>(client: Client, config: &C) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: Url::parse(config.endpoint())?,
            query_param: config.query_param().to_string(),
            target_template: config.target_template().to_string(),
        })
    }

    pub fn target_url(&self, page: u32) -> String {
        self.target_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    pub fn request_url(&self, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair(&self.query_param, &self.target_url(page));
        url
    }
}

#[async_trait::async_trait]
impl PageFetcher for ProxyFetcher {
    async fn fetch_page(&self, page: u32) -> FetchOutcome {
        let url = self.request_url(page);
        tracing::debug!("Requesting page {} via {}", page, url);

        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!("Page {} response status: {}", page, status);
                if status == StatusCode::OK {
                    FetchOutcome::Success
                } else {
                    FetchOutcome::HttpError {
                        status: status.as_u16(),
                    }
                }
            }
            Err(e) => {
                tracing::debug!("Page {} transport failure (timeout: {})", page, e.is_timeout());
                FetchOutcome::TransportError {
                    message: describe_error(&e),
                }
            }
        }
    }
}

/// The error followed by its source chain, e.g.
/// "error sending request for url (...): operation timed out".
fn describe_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
