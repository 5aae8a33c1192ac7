use hyper::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS, ORIGIN, VARY,
};

use crate::config::CorsConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

/// Cross-origin headers added to every response.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: AllowedOrigins,
    methods: String,
    allow_credentials: bool,
}

impl CorsPolicy {
    pub fn from_config(config: &CorsConfig) -> Self {
        let origins = if config.allowed_origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(config.allowed_origins.clone())
        };

        Self {
            origins,
            methods: config.allowed_methods.join(","),
            allow_credentials: config.allow_credentials,
        }
    }

    /// Value for `Access-Control-Allow-Origin`, or None when the origin is not
    /// allowed. A wildcard cannot be combined with credentials, so the
    /// caller's origin is echoed instead in that case.
    fn allow_origin(&self, origin: Option<&str>) -> Option<String> {
        match (&self.origins, origin) {
            (AllowedOrigins::Any, _) if !self.allow_credentials => Some("*".to_string()),
            (AllowedOrigins::Any, Some(origin)) => Some(origin.to_string()),
            (AllowedOrigins::List(allowed), Some(origin)) if allowed.iter().any(|a| a == origin) => {
                Some(origin.to_string())
            }
            _ => None,
        }
    }

    /// True when the allow-origin value depends on the request's `Origin`.
    /// `Vary: Origin` is then sent whatever the caller sent.
    fn varies_by_origin(&self) -> bool {
        match self.origins {
            AllowedOrigins::Any => self.allow_credentials,
            AllowedOrigins::List(_) => true,
        }
    }

    pub fn apply(&self, request: &HeaderMap, response: &mut HeaderMap, preflight: bool) {
        let origin = request.get(ORIGIN).and_then(|v| v.to_str().ok());
        let allowed = self.allow_origin(origin);

        if self.varies_by_origin() {
            response.append(VARY, HeaderValue::from_static("Origin"));
        }

        let Some(allowed) = allowed.and_then(|a| HeaderValue::from_str(&a).ok()) else {
            return;
        };
        response.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allowed);

        if self.allow_credentials {
            response.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
        }

        if preflight {
            if let Ok(methods) = HeaderValue::from_str(&self.methods) {
                response.insert(ACCESS_CONTROL_ALLOW_METHODS, methods);
            }
            if let Some(requested) = request.get(ACCESS_CONTROL_REQUEST_HEADERS) {
                response.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
                response.append(VARY, HeaderValue::from_static("Access-Control-Request-Headers"));
            }
        }
    }
}
