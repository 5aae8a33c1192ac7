use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use weather_relay::adapters::{serve, CorsPolicy, HyperGatewayAdapter, ReqwestWeatherProvider};
use weather_relay::config::RelayConfig;
use weather_relay::domain::WeatherGateway;

#[derive(Parser, Debug)]
#[clap(version = env!("WEATHER_RELAY_VERSION"), author = env!("CARGO_PKG_AUTHORS"))]
pub struct Opts {
    /// Configuration file (defaults to the per-user config location)
    #[clap(long, short = 'c')]
    config: Option<PathBuf>,

    /// listen on this network address
    #[clap(long, short = 'b')]
    bind: Option<String>,

    /// listen on this port
    #[clap(long, short = 'p', env = "PORT")]
    port: Option<u16>,

    /// OpenWeatherMap API key
    #[clap(long, env = "OPENWEATHERMAP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RelayConfig::load(opts.config.as_deref())?.with_overrides(opts.bind, opts.port, opts.api_key);

    if config.api_key().is_none() {
        warn!("No OpenWeatherMap API key configured; upstream lookups will be answered with 401");
    }

    let provider = Arc::new(ReqwestWeatherProvider::new(
        &config.upstream.base_url,
        config.upstream.timeout(),
    )?);
    let gateway = Arc::new(WeatherGateway::new(provider, config.gateway_settings()));
    let adapter = Arc::new(HyperGatewayAdapter::new(gateway, CorsPolicy::from_config(&config.cors)));

    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!("Server running on {}", listener.local_addr()?);

    tokio::select! {
        _ = serve(listener, adapter) => {}
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutting down");
        }
    }

    Ok(())
}
