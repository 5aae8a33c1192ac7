use std::sync::Arc;
use tracing::error;

use super::{
    Bytes, GatewayError, GatewaySettings, HealthStatus, Result, WeatherQuery, WeatherRequest, WeatherResource,
};
use crate::ports::WeatherProviderPort;

#[derive(Clone)]
pub struct WeatherGateway {
    provider: Arc<dyn WeatherProviderPort>,
    settings: Arc<GatewaySettings>,
}

impl WeatherGateway {
    pub fn new(provider: Arc<dyn WeatherProviderPort>, settings: GatewaySettings) -> Self {
        Self {
            provider,
            settings: Arc::new(settings),
        }
    }

    /// Current conditions for `request.city`. Rejected before any upstream
    /// call when the city is missing.
    pub async fn fetch_current_weather(&self, request: &WeatherRequest) -> Result<Bytes> {
        let city = request.city().ok_or(GatewayError::MissingCity)?;
        let query = self.build_query(city, request);
        self.fetch(WeatherResource::CurrentWeather, &query).await
    }

    /// 5-day / 3-hour forecast, falling back to the configured default city.
    pub async fn fetch_forecast(&self, request: &WeatherRequest) -> Result<Bytes> {
        let city = request.city().unwrap_or(&self.settings.default_forecast_city);
        let query = self.build_query(city, request);
        self.fetch(WeatherResource::Forecast, &query).await
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "API is running".to_string(),
            message: format!("Welcome to {} API", self.settings.service_name),
        }
    }

    fn build_query(&self, city: &str, request: &WeatherRequest) -> WeatherQuery {
        WeatherQuery {
            city: city.to_string(),
            api_key: self.settings.api_key.clone(),
            units: request.units.clone(),
            lang: request.lang.clone(),
        }
    }

    async fn fetch(&self, resource: WeatherResource, query: &WeatherQuery) -> Result<Bytes> {
        let failure = match self.provider.fetch(resource, query).await {
            Ok(reply) if reply.status.is_success() => return Ok(reply.body),
            Ok(reply) => GatewayError::from_upstream(reply.status, &reply.body),
            Err(err) => err,
        };

        error!("Error fetching {} data for {:?}: {}", resource, query.city, failure);
        Err(failure)
    }
}
