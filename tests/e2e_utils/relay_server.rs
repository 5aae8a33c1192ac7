#![cfg(test)]
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use weather_relay::adapters::{serve, CorsPolicy, HyperGatewayAdapter, ReqwestWeatherProvider};
use weather_relay::config::RelayConfig;
use weather_relay::domain::WeatherGateway;

pub const TEST_API_KEY: &str = "e2e-key";

pub struct TestRelayServer {
    addr: SocketAddr,
    server_handle: JoinHandle<()>,
}

impl TestRelayServer {
    /// Boot the relay on an ephemeral port, talking to `upstream_base`.
    pub async fn start(upstream_base: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = RelayConfig {
            api_key: Some(TEST_API_KEY.to_string()),
            ..RelayConfig::default()
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let provider = Arc::new(ReqwestWeatherProvider::new(upstream_base, Duration::from_secs(5))?);
        let gateway = Arc::new(WeatherGateway::new(provider, config.gateway_settings()));
        let adapter = Arc::new(HyperGatewayAdapter::new(gateway, CorsPolicy::from_config(&config.cors)));

        let server_handle = tokio::spawn(serve(listener, adapter));

        Ok(Self { addr, server_handle })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestRelayServer {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}
