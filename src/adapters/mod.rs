pub mod hyper_server;
pub mod reqwest_client;

pub use hyper_server::{serve, CorsPolicy, HyperGatewayAdapter};
pub use reqwest_client::ReqwestWeatherProvider;
