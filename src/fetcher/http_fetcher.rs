use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::domain::FeedData;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpFetcher {
    client: Client,
    normalizer: Normalizer,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("mrss/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            normalizer: Normalizer::new(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FeedData> {
        let url = Url::parse(url)?;

        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        self.normalizer.normalize(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::MrssError;

    #[test]
    fn test_rejects_invalid_url() {
        let fetcher = HttpFetcher::new().unwrap();
        let err = tokio_test::block_on(fetcher.fetch("not a url")).unwrap_err();
        assert!(matches!(err, MrssError::InvalidUrl(_)));
    }
}
