pub use hyper::body::Bytes;
pub use hyper::StatusCode;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherResource {
    CurrentWeather,
    Forecast,
}

impl WeatherResource {
    /// Path segment of the resource on the provider, relative to its base URL.
    pub fn path(&self) -> &'static str {
        match self {
            WeatherResource::CurrentWeather => "weather",
            WeatherResource::Forecast => "forecast",
        }
    }
}

impl fmt::Display for WeatherResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherResource::CurrentWeather => write!(f, "weather"),
            WeatherResource::Forecast => write!(f, "forecast"),
        }
    }
}

/// Query parameters of an inbound lookup, as the caller sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherRequest {
    pub city: Option<String>,
    pub units: Option<String>,
    pub lang: Option<String>,
}

impl WeatherRequest {
    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Parse a raw query string. The first occurrence of a key wins and empty
    /// values are treated as absent.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut request = Self::default();
        let Some(query) = query else {
            return request;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "city" => &mut request.city,
                "units" => &mut request.units,
                "lang" => &mut request.lang,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        request
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }
}

/// What the gateway sends to the provider for a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub api_key: String,
    pub units: Option<String>,
    pub lang: Option<String>,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            api_key: api_key.into(),
            units: None,
            lang: None,
        }
    }

    /// Query-string pairs in the order they are sent upstream.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("q", self.city.as_str()), ("appid", self.api_key.as_str())];
        if let Some(units) = &self.units {
            params.push(("units", units.as_str()));
        }
        if let Some(lang) = &self.lang {
            params.push(("lang", lang.as_str()));
        }
        params
    }
}

/// Any answer the provider gave, successful or not.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl UpstreamReply {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub api_key: String,
    pub default_forecast_city: String,
    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody<'a> {
    pub message: &'a str,
}
