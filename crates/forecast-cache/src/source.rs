use async_trait::async_trait;
use yr_forecast::{ForecastKey, ForecastRecord, YrClient};

/// Origin of forecasts on a cache miss
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(&self, key: &ForecastKey) -> yr_forecast::Result<ForecastRecord>;
}

#[async_trait]
impl ForecastSource for YrClient {
    async fn fetch_forecast(&self, key: &ForecastKey) -> yr_forecast::Result<ForecastRecord> {
        self.forecast(key).await
    }
}
