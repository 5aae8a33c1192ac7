use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::domain::{GatewayError, Result, UpstreamReply, WeatherQuery, WeatherResource};
use crate::ports::WeatherProviderPort;

pub struct ReqwestWeatherProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestWeatherProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GatewayError::Transport(format!("Invalid provider URL {}: {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// `<base>/<resource>`, keeping any path prefix the base URL carries.
    fn resource_url(&self, resource: WeatherResource) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/{}", url.path().trim_end_matches('/'), resource.path());
        url.set_path(&path);
        url
    }
}

#[async_trait]
impl WeatherProviderPort for ReqwestWeatherProvider {
    async fn fetch(&self, resource: WeatherResource, query: &WeatherQuery) -> Result<UpstreamReply> {
        let url = self.resource_url(resource);
        log::debug!("GET {} q={:?}", url, query.city);

        let http_response = self
            .client
            .get(url)
            .query(&query.params())
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = http_response.status();

        let body = http_response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(format!("Failed to read response body: {}", e)))?;

        log::debug!("{} answered {} ({} bytes)", resource, status, body.len());
        Ok(UpstreamReply::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusCode;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base: &str) -> ReqwestWeatherProvider {
        ReqwestWeatherProvider::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_resource_url_keeps_base_path() {
        let p = provider("https://api.openweathermap.org/data/2.5");
        assert_eq!(
            p.resource_url(WeatherResource::CurrentWeather).as_str(),
            "https://api.openweathermap.org/data/2.5/weather"
        );

        let p = provider("http://localhost:8080/");
        assert_eq!(
            p.resource_url(WeatherResource::Forecast).as_str(),
            "http://localhost:8080/forecast"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ReqwestWeatherProvider::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_sends_city_and_key() {
        let mock_server = MockServer::start().await;
        let payload = r#"{"name":"London","cod":200}"#;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "secret"))
            .and(query_param_is_missing("units"))
            .respond_with(ResponseTemplate::new(200).set_body_string(payload))
            .expect(1)
            .mount(&mock_server)
            .await;

        let p = provider(&format!("{}/data/2.5", mock_server.uri()));
        let reply = p
            .fetch(WeatherResource::CurrentWeather, &WeatherQuery::new("London", "secret"))
            .await
            .unwrap();

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body.as_ref(), payload.as_bytes());
    }

    #[tokio::test]
    async fn test_forwards_optional_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Paris"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "fr"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut query = WeatherQuery::new("Paris", "secret");
        query.units = Some("metric".to_string());
        query.lang = Some("fr".to_string());

        let reply = provider(&mock_server.uri())
            .fetch(WeatherResource::Forecast, &query)
            .await
            .unwrap();
        assert_eq!(reply.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_error_status_is_a_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&mock_server)
            .await;

        let reply = provider(&mock_server.uri())
            .fetch(WeatherResource::CurrentWeather, &WeatherQuery::new("Atlantis", "secret"))
            .await
            .unwrap();

        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert!(String::from_utf8_lossy(&reply.body).contains("city not found"));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = provider(&format!("http://{}", addr))
            .fetch(WeatherResource::CurrentWeather, &WeatherQuery::new("London", "secret"))
            .await;

        match result {
            Err(GatewayError::Transport(_)) => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_as_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let slow = ReqwestWeatherProvider::new(&mock_server.uri(), Duration::from_millis(200)).unwrap();
        let result = slow
            .fetch(WeatherResource::CurrentWeather, &WeatherQuery::new("London", "secret"))
            .await;

        match result {
            Err(err @ GatewayError::Transport(_)) => {
                assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(err.client_message(), "Internal server error");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
