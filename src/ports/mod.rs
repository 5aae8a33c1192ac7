pub mod weather_provider;

pub use weather_provider::WeatherProviderPort;
