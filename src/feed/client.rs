use std::time::Duration;

use super::error::FeedError;
use crate::sim::FixSet;

/// A source of authoritative fixes. The HTTP implementation talks to the
/// dashboard backend; tests substitute their own.
pub trait FixSource: Send + Sync {
    fn fetch(&self) -> impl std::future::Future<Output = Result<FixSet, FeedError>> + Send;
}

pub struct HttpFixSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFixSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

impl FixSource for HttpFixSource {
    async fn fetch(&self) -> Result<FixSet, FeedError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }
        let set = response.json::<FixSet>().await?;
        Ok(set)
    }
}
