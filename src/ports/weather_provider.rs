use crate::domain::{Result, UpstreamReply, WeatherQuery, WeatherResource};
use async_trait::async_trait;

/// Port for talking to the upstream weather provider
#[async_trait]
pub trait WeatherProviderPort: Send + Sync {
    /// Issue a single GET for `resource` with the given query.
    ///
    /// Any HTTP answer, whatever its status, is returned as `Ok`. `Err` means
    /// no response was received (connect failure, DNS, timeout, truncated body).
    async fn fetch(&self, resource: WeatherResource, query: &WeatherQuery) -> Result<UpstreamReply>;
}
